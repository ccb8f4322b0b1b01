// Rogue party generator schema - static data definitions
// This crate contains the enums and data records shared between the generator
// and the RON tables it embeds: types, moves, items, species, competitive
// presets and trainer definitions.

// Re-export the main types
pub use items::*;
pub use moves::*;
pub use pokemon_types::*;
pub use species_data::*;
pub use trainer_data::*;

pub mod items;
pub mod moves;
pub mod pokemon_types;
pub mod species_data;
pub mod trainer_data;
