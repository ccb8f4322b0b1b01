//! Difficulty policy: pure functions from trainer role, tier and slider to
//! generation parameters.

use crate::rng::RogueRng;
use crate::settings::{Difficulty, GameSettings};
use crate::trainers::Trainer;
use serde::{Deserialize, Serialize};

pub const PARTY_SIZE: usize = 6;
pub const MAX_LEVEL: u8 = 100;

pub const GYM_START_TIER: u8 = 0;
pub const GYM_MID_TIER: u8 = 4;
pub const ELITE_START_TIER: u8 = 8;
pub const CHAMP_START_TIER: u8 = 12;
pub const FINAL_CHAMP_TIER: u8 = 13;
pub const MAX_BOSS_COUNT: u8 = 14;

pub const TRAINER_SHINY_PERCENT: u8 = 25;

/// Toughness of the route an encounter happens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RouteModifier {
    /// Trainers lag behind the player.
    Calm,
    #[default]
    Average,
    /// Trainers track the player's level cap.
    Tough,
}

/// Per-encounter context supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncounterContext {
    pub route: RouteModifier,
    /// The encounter happens in a legendary room.
    pub legendary_room: bool,
    /// The trainer is met as a mini-boss and fields mons a little below the level cap.
    #[serde(default)]
    pub mini_boss: bool,
}

/// Species policy flags for one generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpeciesPolicy {
    pub allow_item_evos: bool,
    pub allow_weak_legends: bool,
    pub allow_strong_legends: bool,
    pub prefer_strong_species: bool,
}

/// Policy evaluated for one tier under one set of settings.
#[derive(Debug, Clone, Copy)]
pub struct Policy<'a> {
    pub settings: &'a GameSettings,
    pub tier: u8,
}

impl<'a> Policy<'a> {
    pub fn new(settings: &'a GameSettings, tier: u8) -> Self {
        Self { settings, tier }
    }

    fn difficulty(&self) -> Difficulty {
        self.settings.difficulty
    }

    /// Level of a boss fought at `tier`.
    pub fn level_for_tier(&self, tier: u8) -> u8 {
        if self.settings.gauntlet {
            return MAX_LEVEL;
        }
        if tier < ELITE_START_TIER {
            10 * (tier + 1)
        } else if tier < CHAMP_START_TIER {
            80 + 4 * (tier - ELITE_START_TIER + 1)
        } else {
            MAX_LEVEL
        }
    }

    pub fn boss_level(&self) -> u8 {
        self.level_for_tier(self.tier)
    }

    /// The player's soft level cap.
    pub fn player_level(&self, level_offset: u8) -> u8 {
        self.boss_level().saturating_sub(level_offset)
    }

    pub fn rival_level(&self, level_offset: u8) -> u8 {
        self.player_level(level_offset)
    }

    pub fn mini_boss_level(&self, level_offset: u8) -> u8 {
        self.player_level(level_offset).saturating_sub(5)
    }

    /// Level of a generic trainer. Never below the previous tier's boss level.
    pub fn generic_level(&self, level_offset: u8, route: RouteModifier) -> u8 {
        let (start, player) = if self.tier == 0 {
            (5u16, (self.player_level(level_offset) as u16 / 2).max(5))
        } else {
            (
                self.level_for_tier(self.tier - 1) as u16,
                self.player_level(level_offset) as u16,
            )
        };

        let level = match route {
            RouteModifier::Calm => start,
            RouteModifier::Average => ((start + player) / 2).max(start),
            RouteModifier::Tough => start.max(if player > 5 { player - 5 } else { 5 }),
        };
        level.min(MAX_LEVEL as u16) as u8
    }

    pub fn trainer_level(&self, trainer: &Trainer, level_offset: u8, encounter: &EncounterContext) -> u8 {
        if trainer.is_boss() {
            return self.boss_level();
        }
        if encounter.mini_boss {
            return self.mini_boss_level(level_offset);
        }
        if trainer.is_rival() {
            return self.rival_level(level_offset);
        }
        if let Some(level) = trainer.level_override.filter(|&l| l != 0) {
            return level;
        }
        self.generic_level(level_offset, encounter.route)
    }

    /// IV every stat of the trainer's mons is fixed to.
    pub fn fixed_iv(&self, trainer: &Trainer) -> u8 {
        let tier = self.tier;
        let hard_key_table = || match tier {
            t if t >= CHAMP_START_TIER => 31,
            t if t >= ELITE_START_TIER => 21,
            t if t >= GYM_MID_TIER + 2 => 19,
            t if t >= GYM_MID_TIER - 1 => 15,
            t if t >= 1 => 11,
            _ => 5,
        };

        match self.difficulty() {
            Difficulty::Easy => 0,
            Difficulty::Medium if trainer.is_key() => match tier {
                t if t >= CHAMP_START_TIER => 16,
                t if t >= ELITE_START_TIER => 10,
                t if t >= GYM_MID_TIER => 8,
                t if t >= GYM_MID_TIER - 1 => 6,
                _ => 0,
            },
            Difficulty::Medium => 0,
            Difficulty::Hard if trainer.is_key() => hard_key_table(),
            Difficulty::Hard => {
                if tier > ELITE_START_TIER {
                    13
                } else {
                    5
                }
            }
            Difficulty::Brutal if trainer.is_key() => match tier {
                t if t >= GYM_MID_TIER + 1 => 31,
                t if t >= GYM_MID_TIER - 1 => 21,
                t if t >= 1 => 19,
                _ => 15,
            },
            // Regular trainers scale like hard bosses.
            Difficulty::Brutal => hard_key_table(),
        }
    }

    /// Number of mons to generate, clamped to `capacity`. Generic trainers
    /// draw from the stream.
    pub fn party_size(&self, trainer: &Trainer, level: u8, capacity: usize, rng: &mut RogueRng) -> usize {
        if level == 1 {
            return 1.min(capacity);
        }

        let tier = self.tier;
        let count = if trainer.is_key() {
            if self.settings.gauntlet {
                PARTY_SIZE
            } else {
                match self.difficulty() {
                    Difficulty::Easy | Difficulty::Medium => match tier {
                        0 if trainer.is_rival() => 2,
                        0 | 1 => 3,
                        t if t <= GYM_MID_TIER => 4,
                        t if t <= GYM_MID_TIER + 2 => 5,
                        _ => 6,
                    },
                    Difficulty::Hard => match tier {
                        0 if trainer.is_rival() => 3,
                        0 => 4,
                        1 => 5,
                        _ => 6,
                    },
                    Difficulty::Brutal => match tier {
                        0 if trainer.is_rival() => 5,
                        _ => 6,
                    },
                }
            }
        } else {
            let (min, max) = match tier {
                t if t <= 1 => (1, 2),
                2 => (1, 3),
                t if t < CHAMP_START_TIER => (2, 4),
                _ => (3, 4),
            };
            min + rng.range((max - min + 1) as u32) as usize
        };

        count.min(capacity)
    }

    pub fn uses_valid_natures(&self, trainer: &Trainer) -> bool {
        if !trainer.is_key() {
            return false;
        }
        match self.difficulty() {
            Difficulty::Easy => false,
            Difficulty::Medium => self.tier >= FINAL_CHAMP_TIER,
            Difficulty::Hard => self.tier >= ELITE_START_TIER,
            Difficulty::Brutal => true,
        }
    }

    /// Whether query scripts see the party so far to spread types out.
    pub fn optimizes_coverage(&self, trainer: &Trainer) -> bool {
        match self.difficulty() {
            Difficulty::Easy => false,
            Difficulty::Medium if trainer.is_rival() => true,
            Difficulty::Medium if trainer.is_key() => self.tier >= ELITE_START_TIER - 2,
            Difficulty::Medium => false,
            Difficulty::Hard if trainer.is_rival() => true,
            Difficulty::Hard if trainer.is_key() => self.tier >= GYM_MID_TIER,
            Difficulty::Hard => self.tier >= ELITE_START_TIER,
            Difficulty::Brutal => true,
        }
    }

    /// Whether the mon in `index` of a `count`-mon party gets a competitive set.
    pub fn uses_competitive_moveset(
        &self,
        trainer: &Trainer,
        encounter: &EncounterContext,
        index: usize,
        count: usize,
    ) -> bool {
        let is_last = index + 1 == count;
        let prefer = (encounter.legendary_room || encounter.route == RouteModifier::Tough)
            && (index == 0 || is_last);

        if self.settings.gauntlet {
            return trainer.is_any_boss();
        }

        let wanted = prefer || trainer.is_any_boss();
        match self.difficulty() {
            Difficulty::Easy => false,
            Difficulty::Medium => match self.tier {
                0 => false,
                1 => wanted && is_last,
                _ => wanted,
            },
            Difficulty::Hard => match self.tier {
                0 => wanted && is_last,
                1 => wanted,
                _ => true,
            },
            Difficulty::Brutal => true,
        }
    }

    /// Item evolution and legendary policy. Each slider's ladder is
    /// cumulative: a later tier keeps everything an earlier tier allowed.
    pub fn species_policy(&self) -> SpeciesPolicy {
        let tier = self.tier;
        let (items_and_weak_at, strong_at, items_at) = match self.difficulty() {
            Difficulty::Easy => (Some(8), None, None),
            Difficulty::Medium => (Some(7), Some(8), Some(4)),
            Difficulty::Hard => (Some(2), Some(5), None),
            Difficulty::Brutal => (Some(1), Some(2), None),
        };
        let reached = |at: Option<u8>| at.is_some_and(|at| tier >= at);

        let strong = reached(strong_at);
        let weak = reached(items_and_weak_at) || strong;
        let items = match self.difficulty() {
            // Medium unlocks item evolutions before any legendary.
            Difficulty::Medium => reached(items_at),
            _ => weak,
        };

        SpeciesPolicy {
            allow_item_evos: items,
            allow_weak_legends: weak,
            allow_strong_legends: strong,
            prefer_strong_species: strong,
        }
    }
}

/// Strong-only filtering is safe once the dex is large enough to always have candidates.
pub fn can_entirely_avoid_weak_species(dex_limit: u16) -> bool {
    dex_limit >= 380
}
