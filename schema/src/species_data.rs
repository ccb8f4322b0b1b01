use crate::{Item, Move, PokemonType};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter};

/// Written in data files as a `(hp, atk, def, spatk, spdef, spd)` tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StatTuple", into = "StatTuple")]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

type StatTuple = (u8, u8, u8, u8, u8, u8);

impl From<StatTuple> for BaseStats {
    fn from((hp, attack, defense, sp_attack, sp_defense, speed): StatTuple) -> Self {
        BaseStats {
            hp,
            attack,
            defense,
            sp_attack,
            sp_defense,
            speed,
        }
    }
}

impl From<BaseStats> for StatTuple {
    fn from(s: BaseStats) -> Self {
        (s.hp, s.attack, s.defense, s.sp_attack, s.sp_defense, s.speed)
    }
}

impl BaseStats {
    /// Base stat total.
    pub fn total(&self) -> u16 {
        self.as_array().iter().map(|&s| s as u16).sum()
    }

    /// HP, ATK, DEF, SP.ATK, SP.DEF, SPD
    pub fn as_array(&self) -> [u8; 6] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.sp_attack,
            self.sp_defense,
            self.speed,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvolutionMethod {
    Level(u8),
    Item(Item),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionData {
    pub evolves_into: String, // Species name
    pub method: EvolutionMethod,
}

bitflags! {
    /// Competitive suitability flags. Species carry them when they have a strong
    /// preset for the format; presets carry them for the format they were built for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct PresetFlags: u8 {
        const SINGLES_STRONG = 1 << 0;
        const DOUBLES_STRONG = 1 << 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumCount)]
pub enum Nature {
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

/// A predefined held item / ability / moveset template for a species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitiveSet {
    pub ability_slot: u8,
    pub held_item: Option<Item>,
    pub moves: Vec<Move>,
    pub nature: Nature,
    #[serde(default)]
    pub flags: PresetFlags,
}

impl CompetitiveSet {
    pub fn has_damaging_move(&self) -> bool {
        self.moves.iter().any(|m| m.is_damaging())
    }

    pub fn knows(&self, move_: Move) -> bool {
        self.moves.contains(&move_)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesData {
    pub name: String,
    pub dex: u16,
    pub types: Vec<PokemonType>,
    pub stats: BaseStats,
    #[serde(default)]
    pub legendary: bool,
    #[serde(default)]
    pub flags: PresetFlags,
    /// Set for alternate forms; names the species the form belongs to.
    #[serde(default)]
    pub form_of: Option<String>,
    #[serde(default)]
    pub evolutions: Vec<EvolutionData>,
    /// (level, move) pairs in learn order.
    #[serde(default)]
    pub learnset: Vec<(u8, Move)>,
}

impl SpeciesData {
    /// Moves known at `level`: the four most recently learned.
    pub fn moves_at_level(&self, level: u8) -> Vec<Move> {
        let mut learned_moves: Vec<Move> = Vec::new();

        for &(learn_level, move_) in &self.learnset {
            if learn_level <= level && !learned_moves.contains(&move_) {
                learned_moves.push(move_);
            }
        }

        if learned_moves.len() > 4 {
            learned_moves = learned_moves.into_iter().rev().take(4).rev().collect();
        }

        if learned_moves.is_empty() {
            learned_moves.push(Move::Tackle);
        }

        learned_moves
    }
}

/// Competitive presets for one species, as stored in the preset table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesPresets {
    pub species: String,
    pub sets: Vec<CompetitiveSet>,
}
