use super::PartyGenerator;
use crate::difficulty::{
    EncounterContext, Policy, ELITE_START_TIER, FINAL_CHAMP_TIER, MAX_LEVEL, PARTY_SIZE,
};
use crate::party::TrainerMon;
use crate::pokedex::{Pokedex, SpeciesId};
use crate::presets::HeldItemUsage;
use crate::query::SpeciesQuery;
use crate::rng::RogueRng;
use crate::run_state::{
    RivalRoster, RunState, RIVAL_BASE_PARTY_SIZE, RIVAL_STARTER_INDEX, RIVAL_SWAP_PARTY_SIZE,
    RIVAL_TOTAL_MON_COUNT,
};
use crate::trainers::{Trainer, TrainerId};
use log::{debug, error};

/// Score that makes the signature species win the starter slot outright.
const SIGNATURE_STARTER_SCORE: u32 = 30000;

/// Index of the lowest-BST species in `buffer`, skipping empty slots and the
/// starter. Ties go to the lowest index.
pub fn weakest_mon_index(dex: &Pokedex, buffer: &[Option<SpeciesId>]) -> Option<usize> {
    buffer
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != RIVAL_STARTER_INDEX)
        .filter_map(|(i, slot)| slot.map(|species| (i, dex.bst(species))))
        .min_by_key(|&(i, bst)| (bst, i))
        .map(|(i, _)| i)
}

/// Weakest first, keeping the generated order among equals.
pub fn sort_by_bst(dex: &Pokedex, species: &mut [SpeciesId]) {
    species.sort_by_key(|&id| dex.bst(id));
}

/// Moves the most desirable starter into the starter slot: the strongest,
/// most evolved line, or now and then the trainer's signature species.
fn select_and_move_starter(dex: &Pokedex, trainer: &Trainer, species: &mut [SpeciesId], rng: &mut RogueRng) {
    let prefer_signature = rng.range(5) == 0;

    let mut highest_score = 0;
    let mut highest_index = RIVAL_STARTER_INDEX;
    for (i, &id) in species.iter().enumerate() {
        let mut score = dex.bst(id) as u32 + 1000 * dex.evolution_count(id) as u32;
        if prefer_signature && trainer.is_signature_species(dex, id) {
            score = SIGNATURE_STARTER_SCORE;
        }

        if score > highest_score {
            highest_index = i;
            highest_score = score;
        }
    }

    if highest_index < species.len() && RIVAL_STARTER_INDEX < species.len() {
        species.swap(RIVAL_STARTER_INDEX, highest_index);
    }
}

/// Runs `f` with the run pinned to `tier` on a stream seeded with `seed`, then
/// puts both back.
fn with_pinned_tier<T>(run: &mut RunState, tier: u8, seed: u64, f: impl FnOnce(&mut RunState) -> T) -> T {
    let saved_rng = run.rng.clone();
    let saved_tier = run.tier;

    run.tier = tier;
    run.rng.seed(seed);
    let result = f(run);

    run.tier = saved_tier;
    run.rng = saved_rng;
    result
}

fn species_array<const N: usize>(dex: &Pokedex, party: &[TrainerMon]) -> [SpeciesId; N] {
    if party.len() != N {
        error!("Expected {} rival mons but generated {}", N, party.len());
    }
    let mut species = [dex.default_species(); N];
    for (slot, mon) in species.iter_mut().zip(party) {
        *slot = mon.species;
    }
    species
}

impl<'a> PartyGenerator<'a> {
    /// Generates the rival's five base species the first time they are needed.
    /// They are generated as if the run were midway through, from a stream
    /// derived only from the run's base seed, and never change afterwards.
    pub fn generate_rival_base_team_if_needed(&self, run: &mut RunState) {
        let Some(rival) = run.rival else {
            return;
        };
        if run.rival_roster != RivalRoster::Unpopulated {
            return;
        }

        debug!("Generating rival base team");
        let dex = self.dex();
        let encounter = &EncounterContext::default();
        let seed = run.base_seed.wrapping_mul(8071).wrapping_add(6632);
        let base = with_pinned_tier(run, ELITE_START_TIER - 2, seed, |run| {
            let party = self.create_party_internal(
                run,
                rival,
                Vec::new(),
                RIVAL_BASE_PARTY_SIZE,
                RIVAL_BASE_PARTY_SIZE,
                encounter,
            );

            let mut base: [SpeciesId; RIVAL_BASE_PARTY_SIZE] = species_array(dex, &party);
            sort_by_bst(dex, &mut base);
            select_and_move_starter(dex, self.data.trainers.trainer(rival), &mut base, &mut run.rng);
            base
        });

        run.rival_roster = RivalRoster::BasePopulated(base);
        for line in run.describe_rival_roster(dex) {
            debug!("    {}", line);
        }
    }

    /// Generates the four late-game swap species once the base team exists.
    ///
    /// The three weakest base species are dropped and the two that remain seed
    /// a placeholder party, so the swap species are chosen around what the
    /// rival keeps. The first swap species is generated at the start of the
    /// elites, the rest as if facing the champion.
    pub fn generate_rival_swap_team_if_needed(&self, run: &mut RunState) {
        let Some(rival) = run.rival else {
            return;
        };
        let RivalRoster::BasePopulated(base) = run.rival_roster else {
            return;
        };

        debug!("Generating rival swap team");
        let dex = self.dex();
        let encounter = &EncounterContext::default();
        let seed = run.base_seed.wrapping_mul(6632).wrapping_add(8073);
        let party = with_pinned_tier(run, ELITE_START_TIER, seed, |run| {
            let mut buffer: [Option<SpeciesId>; PARTY_SIZE] = [None; PARTY_SIZE];
            for (slot, &species) in buffer.iter_mut().zip(&base) {
                *slot = Some(species);
            }
            for _ in PARTY_SIZE..RIVAL_TOTAL_MON_COUNT {
                if let Some(i) = weakest_mon_index(dex, &buffer[..RIVAL_BASE_PARTY_SIZE]) {
                    buffer[i] = None;
                }
            }

            let placeholder: Vec<TrainerMon> = buffer
                .iter()
                .flatten()
                .map(|&species| TrainerMon::new(dex, species, MAX_LEVEL, 0))
                .collect();
            let replacing = PARTY_SIZE - RIVAL_SWAP_PARTY_SIZE;
            debug_assert_eq!(placeholder.len(), replacing);

            let party = self.create_party_internal(run, rival, placeholder, replacing + 1, PARTY_SIZE, encounter);
            run.tier = FINAL_CHAMP_TIER;
            let party = self.create_party_internal(run, rival, party, PARTY_SIZE, PARTY_SIZE, encounter);
            party[replacing.min(party.len())..].to_vec()
        });

        let mut swap: [SpeciesId; RIVAL_SWAP_PARTY_SIZE] = species_array(dex, &party);
        sort_by_bst(dex, &mut swap);

        run.rival_roster = RivalRoster::SwapPopulated { base, swap };
        for line in run.describe_rival_roster(dex) {
            debug!("    {}", line);
        }
    }

    /// The rival's party for this encounter, drawn from the persisted roster.
    ///
    /// Late in the run the weakest base species are swapped for the swap team,
    /// and every species is rolled back to whatever stage of its line the
    /// current level allows.
    pub(super) fn create_rival_party(
        &self,
        run: &mut RunState,
        rival: TrainerId,
        capacity: usize,
        encounter: &EncounterContext,
    ) -> Vec<TrainerMon> {
        let dex = self.dex();
        let trainer = self.data.trainers.trainer(rival);
        let policy = Policy::new(self.settings, run.tier);

        let level = policy.trainer_level(trainer, run.level_offset, encounter);
        let fixed_iv = policy.fixed_iv(trainer);
        let count = policy.party_size(trainer, level, capacity, &mut run.rng);

        self.generate_rival_base_team_if_needed(run);
        if count > RIVAL_BASE_PARTY_SIZE {
            self.generate_rival_swap_team_if_needed(run);
        }

        let slots = run.rival_roster.slots();
        let mut buffer: [Option<SpeciesId>; PARTY_SIZE] = [None; PARTY_SIZE];
        buffer.copy_from_slice(&slots[..PARTY_SIZE]);

        let swap_amount = match run.tier {
            _ if count != PARTY_SIZE => 0,
            t if t >= FINAL_CHAMP_TIER => 3,
            t if t >= ELITE_START_TIER - 1 => 2,
            t if t >= ELITE_START_TIER - 2 => 1,
            _ => 0,
        };
        for _ in 0..swap_amount {
            if let Some(i) = weakest_mon_index(dex, &buffer[..RIVAL_BASE_PARTY_SIZE]) {
                buffer[i] = None;
            }
        }

        let mut replacements = slots[PARTY_SIZE..].iter().copied();
        for slot in buffer.iter_mut().filter(|slot| slot.is_none()) {
            *slot = replacements.next().flatten();
        }

        let species_policy = policy.species_policy();
        let mut held_items = HeldItemUsage::default();
        let mut party = Vec::with_capacity(count);

        for (i, slot) in buffer.iter().take(count).enumerate() {
            let species = slot.unwrap_or_else(|| {
                error!("Rival roster slot {} is empty", i);
                dex.default_species()
            });
            let species = self.resolve_rival_stage(species, level, species_policy.allow_item_evos);

            let mut mon = TrainerMon::new(dex, species, level, fixed_iv);
            if trainer.is_signature_species(dex, species) && run.rival_has_shiny {
                mon.shiny = true;
            }

            if policy.uses_competitive_moveset(trainer, encounter, i, count) {
                self.apply_preset(&mut mon, &mut held_items, trainer, &policy, &mut run.rng);
            }

            party.push(mon);
        }

        party
    }

    /// The stage of `species`' line the rival may field at `level`. A species
    /// the level does not reach yet is replaced by the pre-evolution that
    /// leads to it.
    fn resolve_rival_stage(&self, species: SpeciesId, level: u8, allow_items: bool) -> SpeciesId {
        let dex = self.dex();
        let mut query = SpeciesQuery::empty(dex);
        query.insert(dex.egg_species(species));
        query.transform_into_evos(level, allow_items, self.settings.dex_limit);

        if query.contains(species) {
            return species;
        }

        let mut weights = query.weights();
        weights.fill(1);
        if weights.has_multiple() {
            // Branching lines: only the branch leading to the roster species.
            weights.calculate(|_, candidate| dex.does_evolve_into(candidate, species) as u8);
        }

        weights.select(0).unwrap_or(species)
    }
}
