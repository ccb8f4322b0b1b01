use crate::data::GameData;
use crate::difficulty::{EncounterContext, PARTY_SIZE};
use crate::generator::PartyGenerator;
use crate::party::TrainerMon;
use crate::pokedex::{Pokedex, SpeciesId};
use crate::run_state::RunState;
use crate::selection::begin_adventure;
use crate::settings::{Difficulty, GameSettings};
use crate::trainers::TrainerId;

pub fn data() -> &'static GameData {
    match GameData::embedded() {
        Ok(data) => data,
        Err(err) => panic!("Failed to load embedded tables: {}", err),
    }
}

pub fn dex() -> &'static Pokedex {
    &data().pokedex
}

pub fn trainer_id(name: &str) -> TrainerId {
    data()
        .trainers
        .find(name)
        .unwrap_or_else(|| panic!("No trainer named '{}'", name))
}

pub fn species_names(party: &[TrainerMon]) -> Vec<&'static str> {
    party.iter().map(|mon| dex().name(mon.species)).collect()
}

pub fn species_of(party: &[TrainerMon]) -> Vec<SpeciesId> {
    party.iter().map(|mon| mon.species).collect()
}

/// A builder for a run positioned at a given tier, with settings to match.
///
/// # Example
/// ```ignore
/// let (settings, mut run) = TestRunBuilder::new(42)
///     .with_difficulty(Difficulty::Hard)
///     .with_tier(5)
///     .build();
/// ```
pub struct TestRunBuilder {
    seed: u64,
    settings: GameSettings,
    tier: u8,
    rival: Option<TrainerId>,
    adventure: bool,
}

impl TestRunBuilder {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            settings: GameSettings::default(),
            tier: 0,
            rival: None,
            adventure: false,
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.settings.difficulty = difficulty;
        self
    }

    pub fn with_tier(mut self, tier: u8) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_expansion(mut self) -> Self {
        self.settings.expansion = true;
        self
    }

    pub fn with_dex_limit(mut self, dex_limit: u16) -> Self {
        self.settings.dex_limit = dex_limit;
        self
    }

    /// Pins the run's rival instead of leaving it unset.
    pub fn with_rival(mut self, name: &str) -> Self {
        self.rival = Some(trainer_id(name));
        self
    }

    /// Picks the rival and boss table the way a new adventure does.
    pub fn with_adventure(mut self) -> Self {
        self.adventure = true;
        self
    }

    pub fn build(self) -> (GameSettings, RunState) {
        let mut run = if self.adventure {
            match begin_adventure(data(), &self.settings, self.seed) {
                Ok(run) => run,
                Err(err) => panic!("Failed to begin adventure: {}", err),
            }
        } else {
            RunState::new(self.seed)
        };

        if let Some(rival) = self.rival {
            run.rival = Some(rival);
        }
        run.tier = self.tier;
        (self.settings, run)
    }
}

/// Generates a full-capacity party with the default encounter.
pub fn generate(settings: &GameSettings, run: &mut RunState, trainer: TrainerId) -> Vec<TrainerMon> {
    let generator = PartyGenerator::new(data(), settings);
    match generator.create_trainer_party(run, trainer, PARTY_SIZE, &EncounterContext::default()) {
        Ok(party) => party,
        Err(err) => panic!("Failed to generate party: {}", err),
    }
}

/// True if no two mons in the party share a base species.
pub fn has_no_similar_pairs(party: &[TrainerMon]) -> bool {
    let dex = dex();
    party.iter().enumerate().all(|(i, a)| {
        party[i + 1..]
            .iter()
            .all(|b| dex.base_species(a.species) != dex.base_species(b.species))
    })
}
