use crate::errors::DataResult;
use crate::pokedex::Pokedex;
use crate::trainers::TrainerCatalog;
use std::sync::LazyLock;

const SPECIES_RON: &str = include_str!("../data/species.ron");
const PRESETS_RON: &str = include_str!("../data/presets.ron");
const TRAINERS_RON: &str = include_str!("../data/trainers.ron");

// Parsed on first use; every later call shares the same tables.
static EMBEDDED: LazyLock<DataResult<GameData>> =
    LazyLock::new(|| GameData::from_ron(SPECIES_RON, PRESETS_RON, TRAINERS_RON));

/// The read-only tables the generator works from.
#[derive(Debug, Clone)]
pub struct GameData {
    pub pokedex: Pokedex,
    pub trainers: TrainerCatalog,
}

impl GameData {
    pub fn from_ron(species_src: &str, presets_src: &str, trainers_src: &str) -> DataResult<Self> {
        let pokedex = Pokedex::from_ron(species_src, presets_src)?;
        let trainers = TrainerCatalog::from_ron(trainers_src, &pokedex)?;
        Ok(Self { pokedex, trainers })
    }

    /// The tables compiled into the crate.
    pub fn embedded() -> DataResult<&'static GameData> {
        EMBEDDED.as_ref().map_err(Clone::clone)
    }
}
