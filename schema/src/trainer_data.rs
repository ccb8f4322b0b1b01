use crate::{Item, PokemonType, TypeMask, Weather};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Trainer role, region and ordering flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct TrainerFlags: u32 {
        const CLASS_GYM_1 = 1 << 0;
        const CLASS_GYM_2 = 1 << 1;
        const CLASS_GYM_3 = 1 << 2;
        const CLASS_GYM_4 = 1 << 3;
        const CLASS_GYM_5 = 1 << 4;
        const CLASS_GYM_6 = 1 << 5;
        const CLASS_GYM_7 = 1 << 6;
        const CLASS_GYM_8 = 1 << 7;
        const CLASS_ELITE_1 = 1 << 8;
        const CLASS_ELITE_2 = 1 << 9;
        const CLASS_ELITE_3 = 1 << 10;
        const CLASS_ELITE_4 = 1 << 11;
        const CLASS_CHAMP = 1 << 12;
        const CLASS_RIVAL = 1 << 13;
        const CLASS_ROUTE = 1 << 14;

        const REGION_ROGUE = 1 << 15;
        const REGION_KANTO = 1 << 16;
        const REGION_JOHTO = 1 << 17;
        const REGION_HOENN = 1 << 18;
        const REGION_SINNOH = 1 << 19;
        const REGION_UNOVA = 1 << 20;
        const REGION_KALOS = 1 << 21;
        const REGION_ALOLA = 1 << 22;
        const REGION_GALAR = 1 << 23;

        const MISC_RAINBOW_EXCLUDE = 1 << 24;
        const MISC_RAINBOW_ONLY = 1 << 25;

        const CLASS_ANY_GYM = Self::CLASS_GYM_1.bits()
            | Self::CLASS_GYM_2.bits()
            | Self::CLASS_GYM_3.bits()
            | Self::CLASS_GYM_4.bits()
            | Self::CLASS_GYM_5.bits()
            | Self::CLASS_GYM_6.bits()
            | Self::CLASS_GYM_7.bits()
            | Self::CLASS_GYM_8.bits();
        const CLASS_ANY_ELITE = Self::CLASS_ELITE_1.bits()
            | Self::CLASS_ELITE_2.bits()
            | Self::CLASS_ELITE_3.bits()
            | Self::CLASS_ELITE_4.bits();
        const CLASS_ANY_MAIN_BOSS = Self::CLASS_ANY_GYM.bits()
            | Self::CLASS_ANY_ELITE.bits()
            | Self::CLASS_CHAMP.bits();
        const REGION_DEFAULT = Self::REGION_KANTO.bits();
    }
}

impl TrainerFlags {
    /// Gym class flag for gym slot `index` (0-7).
    pub fn gym(index: u8) -> TrainerFlags {
        TrainerFlags::from_bits_retain(TrainerFlags::CLASS_GYM_1.bits() << index.min(7))
    }

    /// Elite class flag for elite slot `index` (0-3).
    pub fn elite(index: u8) -> TrainerFlags {
        TrainerFlags::from_bits_retain(TrainerFlags::CLASS_ELITE_1.bits() << index.min(3))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeatherPreference {
    /// Use the weather associated with the trainer's type.
    #[default]
    Default,
    Fixed(Weather),
}

/// One quota-limited sampling phase of a team generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsetData {
    pub included_types: TypeMask,
    #[serde(default)]
    pub excluded_types: TypeMask,
    pub max_samples: u8,
}

/// Steps of a query script. Scripts edit the candidate set in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryScriptOp {
    /// Add every species active in the current ruleset.
    IncludeActive,
    IncludeSpecies(Vec<String>),
    ExcludeSpecies(Vec<String>),
    RetainTypes(TypeMask),
    ExcludeTypes(TypeMask),
    RetainLegendary,
    ExcludeLegendary,
    /// Drop candidates sharing a type with the party built so far.
    /// Only has an effect when the trainer optimizes coverage.
    ExcludePartyTypes,
}

/// Steps of a weight script. Weights start at zero and saturate at 255.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightScriptOp {
    Base(u8),
    TypeBonus(TypeMask, u8),
    SpeciesBonus(Vec<String>, u8),
    /// Bonus for candidates sharing no type with the party built so far.
    CoverageBonus(u8),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamGeneratorData {
    #[serde(default)]
    pub subsets: Vec<SubsetData>,
    #[serde(default)]
    pub query_script_override: Option<Vec<QueryScriptOp>>,
    #[serde(default)]
    pub query_script_post: Option<Vec<QueryScriptOp>>,
    #[serde(default)]
    pub weight_script: Option<Vec<WeightScriptOp>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerData {
    pub name: String,
    pub flags: TrainerFlags,
    /// `None` for trainers without a type, `Mystery` for "any single type".
    #[serde(default)]
    pub type_assignment: Option<PokemonType>,
    /// Key used to avoid picking two bosses of the same theme in one stage.
    #[serde(default)]
    pub type_group: Option<PokemonType>,
    #[serde(default)]
    pub weather: WeatherPreference,
    #[serde(default)]
    pub pokeball: Option<Item>,
    #[serde(default)]
    pub level_override: Option<u8>,
    /// Signature species; may appear shiny and is favoured as the rival's starter.
    #[serde(default)]
    pub shiny_species: Option<String>,
    #[serde(default)]
    pub team_generator: TeamGeneratorData,
}
