//! Trainer party generation.
//!
//! A party is built one slot at a time. Each slot samples a species from a
//! candidate query shaped by the trainer's team generator: first its subsets
//! (type-filtered phases with a sample quota), then fallback mode, which walks
//! a fixed chain of related types away from the trainer's own type until
//! something fits. The rival's roster is generated lazily in two passes and
//! persisted in the [`RunState`] so it stays the same across encounters.

mod rival;
mod sampling;

#[cfg(test)]
mod tests;

pub use rival::{sort_by_bst, weakest_mon_index};
pub use sampling::{calculate_fallback_types, party_contains_similar_species, select_fallback_type};

use crate::data::GameData;
use crate::difficulty::{EncounterContext, Policy, SpeciesPolicy, PARTY_SIZE, TRAINER_SHINY_PERCENT};
use crate::errors::GenerationResult;
use crate::party::TrainerMon;
use crate::pokedex::Pokedex;
use crate::presets::{modify_trainer_mon_preset, select_next_preset, HeldItemUsage};
use crate::query::SpeciesQuery;
use crate::reorder::reorder_party;
use crate::rng::RogueRng;
use crate::run_state::RunState;
use crate::settings::GameSettings;
use crate::trainers::{Trainer, TrainerId};
use log::{debug, warn};

/// Working state of one generation call.
struct GenerationScratch<'a> {
    trainer_id: TrainerId,
    trainer: &'a Trainer,
    party: Vec<TrainerMon>,
    capacity: usize,
    held_items: HeldItemUsage,
    policy: SpeciesPolicy,
    force_legends: bool,
    optimize_coverage: bool,
    evo_level: u8,
    subset_index: usize,
    subset_sample_count: u8,
    fallback_count: u8,
    regenerate_query: bool,
    query: Option<SpeciesQuery<'a>>,
}

impl<'a> GenerationScratch<'a> {
    fn new(
        trainer_id: TrainerId,
        trainer: &'a Trainer,
        party: Vec<TrainerMon>,
        capacity: usize,
        evo_level: u8,
        policy: &Policy,
    ) -> Self {
        Self {
            trainer_id,
            trainer,
            party,
            capacity,
            held_items: HeldItemUsage::default(),
            policy: policy.species_policy(),
            force_legends: false,
            optimize_coverage: policy.optimizes_coverage(trainer),
            evo_level,
            subset_index: 0,
            subset_sample_count: 0,
            fallback_count: 0,
            regenerate_query: true,
            query: None,
        }
    }
}

/// Builds trainer parties from the static tables under one set of settings.
#[derive(Debug, Clone, Copy)]
pub struct PartyGenerator<'a> {
    data: &'a GameData,
    settings: &'a GameSettings,
}

impl<'a> PartyGenerator<'a> {
    pub fn new(data: &'a GameData, settings: &'a GameSettings) -> Self {
        Self { data, settings }
    }

    pub fn data(&self) -> &'a GameData {
        self.data
    }

    pub fn settings(&self) -> &'a GameSettings {
        self.settings
    }

    fn dex(&self) -> &'a Pokedex {
        &self.data.pokedex
    }

    /// Generates the party a trainer sends out at the run's current tier.
    ///
    /// The run's random stream is left exactly as it was found: generation runs
    /// on a stream reseeded from it and the trainer id. The rival's roster may
    /// be populated as a side effect.
    pub fn create_trainer_party(
        &self,
        run: &mut RunState,
        trainer_id: TrainerId,
        capacity: usize,
        encounter: &EncounterContext,
    ) -> GenerationResult<Vec<TrainerMon>> {
        let trainer = self.data.trainers.get(trainer_id)?;
        let capacity = capacity.min(PARTY_SIZE);

        let saved_rng = run.rng.clone();
        let a = run.rng.next() as u64;
        let b = run.rng.next() as u64;
        run.rng.seed(a.wrapping_add((trainer_id.raw() as u64).wrapping_mul(b)));

        let mut party = if trainer.is_rival() && run.is_rival(trainer_id) {
            self.create_rival_party(run, trainer_id, capacity, encounter)
        } else {
            if trainer.is_rival() {
                warn!(
                    "'{}' is not this run's rival, generating a fresh party",
                    trainer.name
                );
            }
            self.create_party_internal(run, trainer_id, Vec::new(), 0, capacity, encounter)
        };

        let pokeball = trainer.capture_device(self.settings.expansion);
        for mon in party.iter_mut() {
            mon.pokeball = pokeball;
        }

        reorder_party(&mut party, trainer, self.settings, run.tier, self.dex());

        run.rng = saved_rng;
        debug!(
            "Generated {} mons for '{}' at tier {}",
            party.len(),
            trainer.name,
            run.tier
        );
        Ok(party)
    }

    /// Fills `party` from its current length up to `count` mons (0 picks the
    /// count from the difficulty policy).
    fn create_party_internal(
        &self,
        run: &mut RunState,
        trainer_id: TrainerId,
        party: Vec<TrainerMon>,
        count: usize,
        capacity: usize,
        encounter: &EncounterContext,
    ) -> Vec<TrainerMon> {
        let dex = self.dex();
        let trainer = self.data.trainers.trainer(trainer_id);
        let policy = Policy::new(self.settings, run.tier);

        let level = policy.trainer_level(trainer, run.level_offset, encounter);
        let fixed_iv = policy.fixed_iv(trainer);
        let count = match count {
            0 => policy.party_size(trainer, level, capacity, &mut run.rng),
            count => count.min(capacity),
        };

        let start_index = party.len();
        let mut scratch = GenerationScratch::new(trainer_id, trainer, party, capacity, level, &policy);

        for i in start_index..count {
            let species = self.sample_next_species(&mut scratch, run);
            let mut mon = TrainerMon::new(dex, species, level, fixed_iv);

            if trainer.is_signature_species(dex, species) && run.rng.chance(TRAINER_SHINY_PERCENT) {
                mon.shiny = true;
            }

            if policy.uses_competitive_moveset(trainer, encounter, i, count) {
                self.apply_preset(&mut mon, &mut scratch.held_items, trainer, &policy, &mut run.rng);
            }

            scratch.party.push(mon);
        }

        debug_assert!(scratch.party.len() <= scratch.capacity);
        scratch.party
    }

    /// Gives the mon one of its species' competitive sets, if it has any.
    fn apply_preset(
        &self,
        mon: &mut TrainerMon,
        held_items: &mut HeldItemUsage,
        trainer: &Trainer,
        policy: &Policy,
        rng: &mut RogueRng,
    ) {
        let dex = self.dex();
        let presets = dex.presets(mon.species);
        if let Some(mut preset) = select_next_preset(presets, held_items, self.settings, rng) {
            let rules = modify_trainer_mon_preset(&mut preset, self.settings, policy.uses_valid_natures(trainer));
            mon.apply_competitive_set(dex, &preset, &rules);
        }
    }
}
