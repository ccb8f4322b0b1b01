use crate::difficulty::MAX_BOSS_COUNT;
use crate::pokedex::{Pokedex, SpeciesId};
use crate::rng::RogueRng;
use crate::trainers::TrainerId;

pub const RIVAL_BASE_PARTY_SIZE: usize = 5;
pub const RIVAL_SWAP_PARTY_SIZE: usize = 4;
pub const RIVAL_TOTAL_MON_COUNT: usize = RIVAL_BASE_PARTY_SIZE + RIVAL_SWAP_PARTY_SIZE;
/// Roster slot of the rival's starter. Never swapped out.
pub const RIVAL_STARTER_INDEX: usize = 1;
pub const RIVAL_MAX_ROUTE_ENCOUNTERS: usize = 4;

/// The rival's species for the whole run, filled in two lazy passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RivalRoster {
    #[default]
    Unpopulated,
    BasePopulated([SpeciesId; RIVAL_BASE_PARTY_SIZE]),
    SwapPopulated {
        base: [SpeciesId; RIVAL_BASE_PARTY_SIZE],
        swap: [SpeciesId; RIVAL_SWAP_PARTY_SIZE],
    },
}

impl RivalRoster {
    pub fn base(&self) -> Option<&[SpeciesId; RIVAL_BASE_PARTY_SIZE]> {
        match self {
            RivalRoster::Unpopulated => None,
            RivalRoster::BasePopulated(base) | RivalRoster::SwapPopulated { base, .. } => Some(base),
        }
    }

    pub fn swap(&self) -> Option<&[SpeciesId; RIVAL_SWAP_PARTY_SIZE]> {
        match self {
            RivalRoster::SwapPopulated { swap, .. } => Some(swap),
            _ => None,
        }
    }

    /// All nine roster slots in order; unpopulated slots are `None`.
    pub fn slots(&self) -> [Option<SpeciesId>; RIVAL_TOTAL_MON_COUNT] {
        let mut slots = [None; RIVAL_TOTAL_MON_COUNT];
        if let Some(base) = self.base() {
            for (slot, &species) in slots.iter_mut().zip(base) {
                *slot = Some(species);
            }
        }
        if let Some(swap) = self.swap() {
            for (slot, &species) in slots[RIVAL_BASE_PARTY_SIZE..].iter_mut().zip(swap) {
                *slot = Some(species);
            }
        }
        slots
    }

    /// Populated species in slot order.
    pub fn species(&self) -> impl Iterator<Item = SpeciesId> {
        self.slots().into_iter().flatten()
    }
}

/// Everything one adventure remembers between party generations.
#[derive(Debug, Clone)]
pub struct RunState {
    pub base_seed: u64,
    pub rng: RogueRng,
    /// Number of bosses beaten so far.
    pub tier: u8,
    /// How far the player's soft level cap sits below the boss level.
    pub level_offset: u8,
    pub boss_trainers: [Option<TrainerId>; MAX_BOSS_COUNT as usize],
    pub rival: Option<TrainerId>,
    pub rival_has_shiny: bool,
    /// Tiers at which the rival shows up on a route.
    pub rival_encounters: [u8; RIVAL_MAX_ROUTE_ENCOUNTERS],
    pub rival_roster: RivalRoster,
    /// Legendaries the run has handed out; the rival never uses these.
    pub legendary_species: Vec<SpeciesId>,
}

impl RunState {
    pub fn new(base_seed: u64) -> Self {
        Self {
            base_seed,
            rng: RogueRng::from_seed(base_seed),
            tier: 0,
            level_offset: 0,
            boss_trainers: [None; MAX_BOSS_COUNT as usize],
            rival: None,
            rival_has_shiny: false,
            rival_encounters: [0; RIVAL_MAX_ROUTE_ENCOUNTERS],
            rival_roster: RivalRoster::Unpopulated,
            legendary_species: Vec::new(),
        }
    }

    pub fn boss_for_tier(&self, tier: u8) -> Option<TrainerId> {
        self.boss_trainers.get(tier as usize).copied().flatten()
    }

    pub fn is_rival(&self, id: TrainerId) -> bool {
        self.rival == Some(id)
    }

    /// Whether the rival should appear on a route at the current tier.
    pub fn is_rival_encounter_tier(&self) -> bool {
        self.rival_encounters.contains(&self.tier)
    }

    pub fn register_legendary(&mut self, species: SpeciesId) {
        if !self.legendary_species.contains(&species) {
            self.legendary_species.push(species);
        }
    }

    /// Names of the populated roster slots, for logging.
    pub fn describe_rival_roster(&self, dex: &Pokedex) -> Vec<String> {
        self.rival_roster
            .slots()
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|id| format!("[{}] = {}", i, dex.name(id))))
            .collect()
    }
}
