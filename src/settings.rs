use crate::errors::{DataError, DataResult};
use schema::TrainerFlags;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::{EnumIter, IntoEnumIterator};

/// Trainer strength slider.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, EnumIter,
)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Brutal,
}

/// How boss trainers are picked for each tier of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TrainerOrder {
    /// Gym class for gyms, elite class for elites, champions for the champion tiers.
    #[default]
    Default,
    /// Any main boss at any tier; each type appears once per run.
    Rainbow,
    /// Exact gym/elite slot per tier.
    Official,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BattleFormat {
    #[default]
    Singles,
    Doubles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Region {
    Rogue,
    Kanto,
    Johto,
    Hoenn,
    Sinnoh,
    Unova,
    Kalos,
    Alola,
    Galar,
}

impl Region {
    pub fn flag(self) -> TrainerFlags {
        match self {
            Region::Rogue => TrainerFlags::REGION_ROGUE,
            Region::Kanto => TrainerFlags::REGION_KANTO,
            Region::Johto => TrainerFlags::REGION_JOHTO,
            Region::Hoenn => TrainerFlags::REGION_HOENN,
            Region::Sinnoh => TrainerFlags::REGION_SINNOH,
            Region::Unova => TrainerFlags::REGION_UNOVA,
            Region::Kalos => TrainerFlags::REGION_KALOS,
            Region::Alola => TrainerFlags::REGION_ALOLA,
            Region::Galar => TrainerFlags::REGION_GALAR,
        }
    }

    /// Regions that only exist with the expanded species set.
    pub fn requires_expansion(self) -> bool {
        matches!(
            self,
            Region::Sinnoh | Region::Unova | Region::Kalos | Region::Alola | Region::Galar
        )
    }
}

/// User-facing configuration consumed by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub difficulty: Difficulty,
    pub trainer_order: TrainerOrder,
    pub battle_format: BattleFormat,
    /// Trainer regions enabled in the options menu.
    pub regions: Vec<Region>,
    /// Expanded species/item set (megas, Z-moves, newer items and moves).
    pub expansion: bool,
    pub mega_evolution: bool,
    pub z_moves: bool,
    pub gauntlet: bool,
    /// Highest national dex number considered active.
    pub dex_limit: u16,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            trainer_order: TrainerOrder::default(),
            battle_format: BattleFormat::default(),
            regions: vec![Region::Kanto, Region::Johto, Region::Hoenn],
            expansion: false,
            mega_evolution: true,
            z_moves: true,
            gauntlet: false,
            dex_limit: 386,
        }
    }
}

impl GameSettings {
    pub fn from_ron_str(src: &str) -> DataResult<Self> {
        ron::from_str(src).map_err(|e| DataError::Parse {
            table: "settings",
            message: e.to_string(),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> DataResult<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|e| DataError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_ron_str(&src)
    }

    pub fn mega_evolution_enabled(&self) -> bool {
        self.expansion && self.mega_evolution
    }

    pub fn z_moves_enabled(&self) -> bool {
        self.expansion && self.z_moves
    }

    /// Region flags for every enabled region available in this ruleset.
    pub fn region_flags(&self) -> TrainerFlags {
        Region::iter()
            .filter(|r| self.regions.contains(r))
            .filter(|r| self.expansion || !r.requires_expansion())
            .fold(TrainerFlags::empty(), |acc, r| acc | r.flag())
    }
}
