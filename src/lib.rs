// In: src/lib.rs

//! Rogue Trainer Party Generator
//!
//! Procedural trainer parties for a monster-collecting roguelike. Bosses,
//! route trainers and the recurring rival are rebuilt every run from a seed:
//! species are sampled tier by tier through type-filtered queries, then
//! given competitive sets and ordered for battle. All static data is loaded
//! from RON tables at startup.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod data;
pub mod difficulty;
pub mod errors;
pub mod generator;
pub mod party;
pub mod pokedex;
pub mod presets;
pub mod query;
pub mod query_script;
pub mod reorder;
pub mod rng;
pub mod run_state;
pub mod selection;
pub mod settings;
pub mod trainers;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `rogue-party` crate,
// making it easy for users to import the most important types directly.

// --- From the `schema` crate ---
// Re-export the static data definitions and enums.
pub use schema::{
    // Supporting Types & Enums
    BaseStats,
    CompetitiveSet,
    Item,
    Move,
    Nature,
    PokemonType,
    PresetFlags,
    TrainerFlags,
    TypeMask,
};

// --- From this crate's modules (`src/`) ---

// Static tables.
pub use data::GameData;
pub use pokedex::{Pokedex, SpeciesId};
pub use trainers::{Trainer, TrainerCatalog, TrainerId};

// Run configuration and state.
pub use difficulty::{EncounterContext, Policy, RouteModifier};
pub use rng::RogueRng;
pub use run_state::{RivalRoster, RunState};
pub use settings::{Difficulty, GameSettings, Region, TrainerOrder};

// Party generation.
pub use generator::PartyGenerator;
pub use party::{MonDisplay, TrainerMon};
pub use selection::{begin_adventure, choose_route_trainers};

// Crate-specific error and result types.
pub use errors::{DataError, DataResult, GenerationError, GenerationResult};
