use crate::pokedex::{Pokedex, SpeciesId};
use crate::presets::CompetitiveSetRules;
use schema::{BaseStats, CompetitiveSet, Item, Move, Nature};
use std::fmt;
use strum::{EnumCount, IntoEnumIterator};

pub const MAX_MON_MOVES: usize = 4;

/// A generated trainer mon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerMon {
    pub species: SpeciesId,
    pub level: u8,
    /// Every IV of the mon is set to this value.
    pub fixed_iv: u8,
    pub stats: [u16; 6], // HP, ATK, DEF, SP.ATK, SP.DEF, SPD
    pub held_item: Option<Item>,
    pub ability_slot: u8,
    pub moves: Vec<Move>,
    pub nature: Nature,
    pub shiny: bool,
    pub pokeball: Item,
}

impl TrainerMon {
    /// A mon with its level-up moveset and no held item.
    pub fn new(dex: &Pokedex, species: SpeciesId, level: u8, fixed_iv: u8) -> Self {
        let data = dex.data(species);
        Self {
            species,
            level,
            fixed_iv,
            stats: calculate_stats(&data.stats, level, fixed_iv),
            held_item: None,
            ability_slot: 0,
            moves: data.moves_at_level(level),
            nature: default_nature(species),
            shiny: false,
            pokeball: Item::PokeBall,
        }
    }

    pub fn knows(&self, move_: Move) -> bool {
        self.moves.contains(&move_)
    }

    /// Applies a competitive set on top of the mon's level-up state.
    pub fn apply_competitive_set(&mut self, dex: &Pokedex, set: &CompetitiveSet, rules: &CompetitiveSetRules) {
        self.held_item = set.held_item;
        self.ability_slot = set.ability_slot;

        let mut moves: Vec<Move> = Vec::with_capacity(MAX_MON_MOVES);
        for &move_ in &set.moves {
            if !moves.contains(&move_) && moves.len() < MAX_MON_MOVES {
                moves.push(move_);
            }
        }

        if !rules.allow_missing_moves {
            let level_up = dex.data(self.species).moves_at_level(self.level);
            for move_ in level_up.into_iter().rev() {
                if moves.len() >= MAX_MON_MOVES {
                    break;
                }
                if !moves.contains(&move_) {
                    moves.push(move_);
                }
            }
        }

        if !moves.is_empty() {
            self.moves = moves;
        }

        if !rules.skip_nature {
            self.nature = set.nature;
        }
    }
}

// Spread natures across species so unset mons are not all the same.
fn default_nature(species: SpeciesId) -> Nature {
    Nature::iter()
        .nth(species.index() % Nature::COUNT)
        .unwrap_or(Nature::Hardy)
}

/// Stats at `level` with every IV set to `iv` and no EVs.
pub fn calculate_stats(base_stats: &BaseStats, level: u8, iv: u8) -> [u16; 6] {
    let base = base_stats.as_array();
    let mut stats = [0u16; 6];

    for i in 0..6 {
        let base_calculation = 2 * base[i] as u16 + iv as u16;
        stats[i] = if i == 0 {
            // HP = floor(0.01 * (2 * Base + IV) * Level) + Level + 10
            (base_calculation * level as u16) / 100 + level as u16 + 10
        } else {
            // Other Stat = floor(0.01 * (2 * Base + IV) * Level) + 5
            (base_calculation * level as u16) / 100 + 5
        };
    }

    stats
}

/// Wraps a mon with the species table so it can be printed.
pub struct MonDisplay<'a> {
    pub dex: &'a Pokedex,
    pub mon: &'a TrainerMon,
}

impl fmt::Display for MonDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mon = self.mon;
        let data = self.dex.data(mon.species);

        write!(f, "Lv.{:<3} {} (#{:03})", mon.level, data.name, data.dex)?;
        if mon.shiny {
            write!(f, " *shiny*")?;
        }
        writeln!(f)?;

        let type_names: Vec<String> = data.types.iter().map(|t| format!("{}", t)).collect();
        writeln!(f, "    Type(s): {}", type_names.join(" / "))?;

        const LABEL_WIDTH: usize = 12;
        let item = mon
            .held_item
            .map(|i| format!("{:?}", i))
            .unwrap_or_else(|| "-".to_string());
        writeln!(f, "    {:<LABEL_WIDTH$} : {}", "Item", item)?;
        writeln!(f, "    {:<LABEL_WIDTH$} : {:?}", "Nature", mon.nature)?;
        writeln!(f, "    {:<LABEL_WIDTH$} : {}", "IVs", mon.fixed_iv)?;

        let labels = ["HP", "Atk", "Def", "SpA", "SpD", "Spe"];
        let stats: Vec<String> = labels
            .iter()
            .zip(mon.stats)
            .map(|(label, value)| format!("{} {}", label, value))
            .collect();
        writeln!(f, "    {:<LABEL_WIDTH$} : {}", "Stats", stats.join(", "))?;

        let moves: Vec<String> = mon.moves.iter().map(|m| format!("{}", m)).collect();
        write!(f, "    {:<LABEL_WIDTH$} : {}", "Moves", moves.join(", "))
    }
}
