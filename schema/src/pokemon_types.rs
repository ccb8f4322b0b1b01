use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumCount, EnumIter, IntoEnumIterator};

/// Elemental types, in the order the type masks use for their bit positions.
///
/// `Mystery` is the "???" type. No species carries it; trainers use it as
/// "any type" in their type assignment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter, EnumCount,
)]
pub enum PokemonType {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Mystery,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PokemonType::Mystery => write!(f, "???"),
            other => write!(f, "{:?}", other),
        }
    }
}

impl PokemonType {
    /// Bit index used by [`TypeMask`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Looks a type up by its mask bit index.
    pub fn from_index(index: usize) -> Option<PokemonType> {
        PokemonType::iter().nth(index)
    }

    pub fn mask(self) -> TypeMask {
        TypeMask::from_bits_retain(1 << self.index())
    }
}

bitflags! {
    /// A set of types. Subsets and fallback queries filter species with these.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct TypeMask: u32 {
        const NORMAL = 1 << 0;
        const FIGHTING = 1 << 1;
        const FLYING = 1 << 2;
        const POISON = 1 << 3;
        const GROUND = 1 << 4;
        const ROCK = 1 << 5;
        const BUG = 1 << 6;
        const GHOST = 1 << 7;
        const STEEL = 1 << 8;
        const MYSTERY = 1 << 9;
        const FIRE = 1 << 10;
        const WATER = 1 << 11;
        const GRASS = 1 << 12;
        const ELECTRIC = 1 << 13;
        const PSYCHIC = 1 << 14;
        const ICE = 1 << 15;
        const DRAGON = 1 << 16;
        const DARK = 1 << 17;
    }
}

impl TypeMask {
    /// True if any of the given types is in the mask.
    pub fn matches_any(self, types: &[PokemonType]) -> bool {
        types.iter().any(|t| self.contains(t.mask()))
    }
}

impl From<PokemonType> for TypeMask {
    fn from(value: PokemonType) -> Self {
        value.mask()
    }
}

/// Overworld weather a boss can bring into battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    None,
    Rain,
    Sunny,
    Sandstorm,
    Snow,
    Fog,
}

impl Weather {
    /// Weather a trainer of the given type brings when it asks for its default.
    pub fn for_type(pokemon_type: PokemonType) -> Weather {
        use PokemonType::*;

        match pokemon_type {
            Water | Electric => Weather::Rain,
            Fire | Grass => Weather::Sunny,
            Ground | Rock | Steel => Weather::Sandstorm,
            Ice => Weather::Snow,
            Ghost | Dark => Weather::Fog,
            _ => Weather::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_bit_positions_follow_enum_order() {
        for (i, t) in PokemonType::iter().enumerate() {
            assert_eq!(t.mask().bits(), 1 << i, "{:?}", t);
            assert_eq!(PokemonType::from_index(i), Some(t));
        }
        assert_eq!(PokemonType::COUNT, 18);
        assert_eq!(TypeMask::all().bits().count_ones(), 18);
    }

    #[test]
    fn test_matches_any() {
        let mask = TypeMask::FIRE | TypeMask::DRAGON;
        assert!(mask.matches_any(&[PokemonType::Water, PokemonType::Dragon]));
        assert!(!mask.matches_any(&[PokemonType::Water]));
        assert!(!TypeMask::empty().matches_any(&[PokemonType::Fire]));
    }

    #[test]
    fn test_mask_reads_from_ron() {
        let mask: TypeMask = ron::from_str("\"FIRE | WATER\"").unwrap();
        assert_eq!(mask, TypeMask::FIRE | TypeMask::WATER);
    }
}
