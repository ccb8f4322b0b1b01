use super::{GenerationScratch, PartyGenerator};
use crate::difficulty::{can_entirely_avoid_weak_species, FINAL_CHAMP_TIER, PARTY_SIZE};
use crate::pokedex::{Pokedex, SpeciesId};
use crate::query::SpeciesQuery;
use crate::query_script::ScriptContext;
use crate::rng::RogueRng;
use crate::run_state::RunState;
use crate::trainers::{Trainer, TrainerId};
use log::error;
use schema::{PokemonType, PresetFlags, TypeMask};
use strum::EnumCount;

/// Past this many fallback escalations duplicate species are allowed back in.
const DUPLICATE_FILTER_FALLBACK_LIMIT: u8 = 10;
/// Past this many fallback escalations the type chain is abandoned.
const TYPE_CHAIN_FALLBACK_LIMIT: u8 = 20;
/// Fallback count at which generation gives up and hands out the default species.
const FALLBACK_EXHAUSTED: u8 = u8::MAX;

/// One step along the type-antagonism chain. `None` means the chain has run
/// out and any type is acceptable.
pub fn select_fallback_type(current: Option<PokemonType>, counter: u16) -> Option<PokemonType> {
    use PokemonType::*;

    let pick = |even: PokemonType, odd: PokemonType| Some(if counter % 2 == 0 { even } else { odd });

    match current? {
        Dark => pick(Fighting, Psychic),
        Psychic => pick(Ghost, Dark),
        Steel => pick(Ground, Dragon),
        Fighting => pick(Rock, Normal),
        Ghost => pick(Poison, Bug),
        Dragon => pick(Fire, Water),
        Fire => pick(Ground, Rock),
        Flying => pick(Normal, Electric),
        Ice => pick(Water, Psychic),
        Normal => pick(Fighting, Ghost),
        _ => None,
    }
}

/// The types a fallback query admits after `fallback_count` escalations.
///
/// Trainers assigned the mystery type get a single random type instead of
/// walking the chain.
pub fn calculate_fallback_types(
    trainer: &Trainer,
    trainer_id: TrainerId,
    fallback_count: u8,
    rng: &mut RogueRng,
) -> TypeMask {
    let mut current = trainer.type_assignment;

    if current == Some(PokemonType::Mystery) {
        while current == Some(PokemonType::Mystery) {
            current = PokemonType::from_index(rng.range(PokemonType::COUNT as u32) as usize);
        }
        return current.map_or_else(TypeMask::all, PokemonType::mask);
    }

    if fallback_count < TYPE_CHAIN_FALLBACK_LIMIT {
        for i in 0..fallback_count {
            current = select_fallback_type(current, trainer_id.raw().wrapping_add(i as u16));
        }
    } else {
        current = None;
    }

    current.map_or_else(TypeMask::all, PokemonType::mask)
}

/// Two species are similar when they share a base species, so alternate
/// forms count as the same mon.
fn is_similar(dex: &Pokedex, a: SpeciesId, b: SpeciesId) -> bool {
    dex.base_species(a) == dex.base_species(b)
}

pub fn party_contains_similar_species(
    dex: &Pokedex,
    party: impl IntoIterator<Item = SpeciesId>,
    species: SpeciesId,
) -> bool {
    party.into_iter().any(|other| is_similar(dex, other, species))
}

impl<'a> PartyGenerator<'a> {
    /// Draws the species for the next slot, advancing the subset cursor and
    /// fallback state as needed. Always returns a species.
    pub(super) fn sample_next_species(&self, scratch: &mut GenerationScratch<'a>, run: &mut RunState) -> SpeciesId {
        let trainer = scratch.trainer;
        let subset_count = trainer.subsets.len();

        // Without subsets the trainer starts in fallback mode.
        if subset_count == 0 && scratch.fallback_count == 0 {
            scratch.fallback_count = 1;
        }

        loop {
            let slot = scratch.party.len();
            let closing_slot = (run.tier == FINAL_CHAMP_TIER && slot == PARTY_SIZE - 2)
                || (run.tier == FINAL_CHAMP_TIER - 1 && slot == PARTY_SIZE - 1);

            if scratch.subset_index < subset_count && trainer.is_any_boss() && closing_slot {
                if !scratch.force_legends {
                    scratch.force_legends = true;
                    scratch.regenerate_query = true;
                }
            } else if scratch.force_legends {
                scratch.force_legends = false;
                scratch.regenerate_query = true;
            }

            let species = self.sample_next_species_internal(scratch, run);

            if scratch.subset_index < subset_count {
                let quota = trainer.subsets[scratch.subset_index].max_samples;
                scratch.subset_sample_count = match species {
                    Some(_) => scratch.subset_sample_count.saturating_add(1),
                    None => quota,
                };

                if scratch.subset_sample_count >= quota {
                    scratch.subset_index += 1;
                    scratch.subset_sample_count = 0;
                    scratch.regenerate_query = true;

                    if scratch.subset_index >= subset_count {
                        scratch.fallback_count = scratch.fallback_count.saturating_add(1);
                    }
                }
            } else if scratch.fallback_count == FALLBACK_EXHAUSTED {
                error!(
                    "Ran out of species for '{}', falling back to the default species",
                    trainer.name
                );
                return self.dex().default_species();
            } else if scratch.fallback_count != 0 {
                scratch.fallback_count += 1;
                scratch.regenerate_query = true;
            }

            if let Some(species) = species {
                return species;
            }
        }
    }

    fn sample_next_species_internal(
        &self,
        scratch: &mut GenerationScratch<'a>,
        run: &mut RunState,
    ) -> Option<SpeciesId> {
        let dex = self.dex();

        if scratch.regenerate_query || scratch.query.is_none() {
            scratch.regenerate_query = false;
            scratch.query = Some(self.build_query(scratch, run));
        }

        let party: Vec<SpeciesId> = scratch.party.iter().map(|mon| mon.species).collect();

        if scratch.fallback_count < DUPLICATE_FILTER_FALLBACK_LIMIT {
            let roster: Vec<SpeciesId> = if run.is_rival(scratch.trainer_id) {
                run.rival_roster.species().collect()
            } else {
                Vec::new()
            };
            let query = scratch.query.as_mut()?;
            query.exclude_where(|id| party_contains_similar_species(dex, party.iter().chain(&roster).copied(), id));
        }

        let context = self.script_context(scratch, &party);
        let query = scratch.query.as_ref()?;
        let mut weights = query.weights();
        match &scratch.trainer.weight_script {
            Some(script) => weights.calculate(|_, id| script.weigh(dex, id, &context)),
            None => weights.fill(1),
        }

        if weights.has_any() {
            weights.select(run.rng.next())
        } else {
            None
        }
    }

    fn script_context(&self, scratch: &GenerationScratch<'a>, party: &[SpeciesId]) -> ScriptContext {
        let party = if scratch.optimize_coverage { party } else { &[] };
        ScriptContext::new(self.dex(), self.settings.dex_limit, party)
    }

    /// Builds the candidate query for the current subset or fallback step.
    fn build_query(&self, scratch: &GenerationScratch<'a>, run: &mut RunState) -> SpeciesQuery<'a> {
        let dex = self.dex();
        let dex_limit = self.settings.dex_limit;
        let trainer = scratch.trainer;
        let subset = trainer.subsets.get(scratch.subset_index);
        let party: Vec<SpeciesId> = scratch.party.iter().map(|mon| mon.species).collect();

        let mut query = SpeciesQuery::empty(dex);
        let custom_script = match &trainer.query_script_override {
            Some(script) => {
                script.execute(&mut query, &self.script_context(scratch, &party));
                true
            }
            None => {
                query.include_active(dex_limit);
                false
            }
        };

        // The rival never reuses a legendary from elsewhere in the run.
        if trainer.is_rival() {
            for &legendary in &run.legendary_species {
                query.remove(legendary);
            }
        }

        let fallback_types = match subset {
            Some(subset) => {
                query.retain_evos_contain_type(subset.included_types);
                None
            }
            None => {
                let types = calculate_fallback_types(trainer, scratch.trainer_id, scratch.fallback_count, &mut run.rng);
                query.retain_evos_contain_type(types);
                Some(types)
            }
        };

        if !custom_script {
            query.transform_into_egg_species();
            query.transform_into_evos(scratch.evo_level, scratch.policy.allow_item_evos, dex_limit);
        }

        let policy = &scratch.policy;
        if policy.prefer_strong_species && can_entirely_avoid_weak_species(dex_limit) {
            query.retain_preset_flags(PresetFlags::SINGLES_STRONG);
        }

        if scratch.force_legends {
            query.retain_legendary();
        }

        match (policy.allow_weak_legends, policy.allow_strong_legends) {
            (false, false) if !scratch.force_legends => query.exclude_legendary(),
            (false, true) => query.retain_legendary_with_flags(PresetFlags::SINGLES_STRONG),
            (true, false) => query.exclude_legendary_with_flags(PresetFlags::SINGLES_STRONG),
            _ => {}
        }

        match (subset, fallback_types) {
            (Some(subset), _) => {
                query.retain_types(subset.included_types);
                query.exclude_types(subset.excluded_types);
            }
            (None, Some(types)) => query.retain_types(types),
            (None, None) => {}
        }

        if let Some(script) = &trainer.query_script_post {
            script.execute(&mut query, &self.script_context(scratch, &party));
        }

        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameData;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(PokemonType::Dark, 0, Some(PokemonType::Fighting))]
    #[case(PokemonType::Dark, 1, Some(PokemonType::Psychic))]
    #[case(PokemonType::Steel, 4, Some(PokemonType::Ground))]
    #[case(PokemonType::Normal, 3, Some(PokemonType::Ghost))]
    #[case(PokemonType::Grass, 0, None)]
    #[case(PokemonType::Mystery, 1, None)]
    fn test_fallback_chain_step(#[case] from: PokemonType, #[case] counter: u16, #[case] expected: Option<PokemonType>) {
        assert_eq!(select_fallback_type(Some(from), counter), expected);
    }

    #[test]
    fn test_fallback_chain_from_nothing_stays_open() {
        assert_eq!(select_fallback_type(None, 0), None);
    }

    #[test]
    fn test_fallback_types_walk_the_chain() {
        let data = GameData::embedded().unwrap();
        let id = data.trainers.find("Karen").unwrap();
        let trainer = data.trainers.trainer(id);
        let mut rng = RogueRng::new_for_test(vec![0]);

        let mut expected = trainer.type_assignment;
        for step in 0..4u8 {
            assert_eq!(
                calculate_fallback_types(trainer, id, step, &mut rng),
                expected.map_or_else(TypeMask::all, PokemonType::mask),
                "step {}",
                step
            );
            expected = select_fallback_type(expected, id.raw() + step as u16);
        }

        assert_eq!(calculate_fallback_types(trainer, id, TYPE_CHAIN_FALLBACK_LIMIT, &mut rng), TypeMask::all());
    }

    #[test]
    fn test_mystery_trainers_roll_a_real_type() {
        let data = GameData::embedded().unwrap();
        let id = data
            .trainers
            .ids()
            .find(|&id| data.trainers.trainer(id).type_assignment == Some(PokemonType::Mystery))
            .expect("a mystery trainer in the table");
        let trainer = data.trainers.trainer(id);

        // Mystery's own index is rerolled.
        let mut rng = RogueRng::new_for_test(vec![PokemonType::Mystery.index() as u32, PokemonType::Fire.index() as u32]);
        assert_eq!(calculate_fallback_types(trainer, id, 0, &mut rng), TypeMask::FIRE);
    }

    #[test]
    fn test_similar_species_share_a_base() {
        let dex = &GameData::embedded().unwrap().pokedex;
        let pidgey = dex.find("Pidgey").unwrap();
        let rattata = dex.find("Rattata").unwrap();

        assert!(party_contains_similar_species(dex, [rattata, pidgey], pidgey));
        assert!(!party_contains_similar_species(dex, [rattata], pidgey));
        assert!(!party_contains_similar_species(dex, [], pidgey));
    }
}
