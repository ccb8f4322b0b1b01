use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// The generation random stream.
///
/// The stream is a plain value: cloning it snapshots the state and assigning
/// the clone back restores it. Party generation and the rival population
/// passes rely on that to leave the caller's sequence untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RogueRng {
    source: RngSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RngSource {
    Seeded(Xoshiro256PlusPlus),
    #[cfg(test)]
    Scripted { outcomes: Vec<u32>, index: usize },
}

impl RogueRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(Xoshiro256PlusPlus::seed_from_u64(seed)),
        }
    }

    /// Replays `outcomes` in order, wrapping around at the end.
    #[cfg(test)]
    pub fn new_for_test(outcomes: Vec<u32>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    /// Re-seeds the stream in place.
    pub fn seed(&mut self, seed: u64) {
        self.source = RngSource::Seeded(Xoshiro256PlusPlus::seed_from_u64(seed));
    }

    pub fn next(&mut self) -> u32 {
        match &mut self.source {
            RngSource::Seeded(rng) => rng.next_u32(),
            #[cfg(test)]
            RngSource::Scripted { outcomes, index } => {
                if outcomes.is_empty() {
                    return 0;
                }
                let outcome = outcomes[*index % outcomes.len()];
                *index += 1;
                outcome
            }
        }
    }

    /// Uniform value in `0..n`. Returns 0 when `n` is 0.
    pub fn range(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.next() % n
    }

    /// True with a `percent` in 100 chance.
    pub fn chance(&mut self, percent: u8) -> bool {
        self.range(100) < percent as u32
    }
}
