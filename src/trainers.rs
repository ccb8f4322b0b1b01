use crate::errors::{DataError, DataResult, GenerationError, GenerationResult};
use crate::pokedex::{Pokedex, SpeciesId};
use crate::query_script::{QueryScript, WeightScript};
use crate::settings::{Difficulty, GameSettings};
use schema::{
    Item, PokemonType, SubsetData, TrainerData, TrainerFlags, Weather, WeatherPreference,
};
use strum::EnumCount;

/// Index of a trainer in the [`TrainerCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrainerId(u16);

impl TrainerId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn raw(self) -> u16 {
        self.0
    }
}

/// A trainer definition with species references resolved and scripts compiled.
#[derive(Debug, Clone)]
pub struct Trainer {
    pub name: String,
    pub flags: TrainerFlags,
    pub type_assignment: Option<PokemonType>,
    pub type_group: Option<PokemonType>,
    pub weather: WeatherPreference,
    pub pokeball: Option<Item>,
    pub level_override: Option<u8>,
    pub shiny_species: Option<SpeciesId>,
    pub subsets: Vec<SubsetData>,
    pub query_script_override: Option<QueryScript>,
    pub query_script_post: Option<QueryScript>,
    pub weight_script: Option<WeightScript>,
}

impl Trainer {
    fn compile(data: TrainerData, dex: &Pokedex) -> DataResult<Self> {
        let context = format!("trainer '{}'", data.name);
        let shiny_species = data
            .shiny_species
            .as_deref()
            .map(|name| dex.id_of(name, &context))
            .transpose()?;
        let generator = data.team_generator;

        Ok(Self {
            query_script_override: generator
                .query_script_override
                .map(|ops| QueryScript::compile(&ops, dex, &context))
                .transpose()?,
            query_script_post: generator
                .query_script_post
                .map(|ops| QueryScript::compile(&ops, dex, &context))
                .transpose()?,
            weight_script: generator
                .weight_script
                .map(|ops| WeightScript::compile(&ops, dex, &context))
                .transpose()?,
            subsets: generator.subsets,
            name: data.name,
            flags: data.flags,
            type_assignment: data.type_assignment,
            type_group: data.type_group,
            weather: data.weather,
            pokeball: data.pokeball,
            level_override: data.level_override,
            shiny_species,
        })
    }

    /// Gym, elite or champion.
    pub fn is_boss(&self) -> bool {
        self.flags.intersects(TrainerFlags::CLASS_ANY_MAIN_BOSS)
    }

    pub fn is_rival(&self) -> bool {
        self.flags.contains(TrainerFlags::CLASS_RIVAL)
    }

    /// Boss or rival.
    pub fn is_any_boss(&self) -> bool {
        self.is_boss() || self.is_rival()
    }

    /// Trainers whose parties follow the boss tables for size, IVs and natures.
    pub fn is_key(&self) -> bool {
        self.is_any_boss()
    }

    /// Key used by selection history to avoid repeating a theme.
    ///
    /// Bosses with a type group share a key per type; everyone else gets a key
    /// unique to the trainer.
    pub fn type_group_key(&self, id: TrainerId) -> u16 {
        match self.type_group {
            Some(group) if self.is_boss() => group.index() as u16,
            _ => PokemonType::COUNT as u16 + id.raw(),
        }
    }

    /// Whether `species` belongs to this trainer's signature line.
    pub fn is_signature_species(&self, dex: &Pokedex, species: SpeciesId) -> bool {
        let root = dex.egg_species(dex.base_species(species));
        self.shiny_species == Some(root)
    }

    /// Battle weather for this trainer. Only bosses and rivals bring weather.
    pub fn weather(&self, settings: &GameSettings, tier: u8) -> Weather {
        if !self.is_any_boss() {
            return Weather::None;
        }

        let uses_preference = match settings.difficulty {
            Difficulty::Easy => false,
            Difficulty::Medium => tier > 2,
            Difficulty::Hard => tier > 0,
            Difficulty::Brutal => true,
        };
        if !uses_preference {
            return Weather::None;
        }

        match self.weather {
            WeatherPreference::Fixed(weather) => weather,
            WeatherPreference::Default => self
                .type_assignment
                .map(Weather::for_type)
                .unwrap_or(Weather::None),
        }
    }

    /// Ball the trainer's party is sent out from.
    pub fn capture_device(&self, expansion: bool) -> Item {
        if !self.is_any_boss() {
            return Item::PokeBall;
        }
        if let Some(ball) = self.pokeball {
            return ball;
        }

        use PokemonType::*;
        match self.type_assignment {
            Some(Bug) => Item::NetBall,
            Some(Dragon) => Item::MasterBall,
            Some(Fighting) => Item::UltraBall,
            Some(Fire) => Item::RepeatBall,
            Some(Flying) => Item::PremierBall,
            Some(Grass) => Item::NestBall,
            Some(Water) => Item::DiveBall,
            Some(Ice) => Item::GreatBall,
            Some(Rock) => Item::TimerBall,
            Some(Mystery) => Item::LuxuryBall,
            Some(Ghost) | Some(Dark) if expansion => Item::DuskBall,
            Some(Steel) if expansion => Item::HeavyBall,
            Some(Psychic) if expansion => Item::DreamBall,
            Some(Electric) if expansion => Item::QuickBall,
            Some(Ground) if expansion => Item::FriendBall,
            Some(Poison) if expansion => Item::MoonBall,
            _ => Item::PokeBall,
        }
    }
}

/// Every trainer the generator can pick from, in definition order.
#[derive(Debug, Clone)]
pub struct TrainerCatalog {
    trainers: Vec<Trainer>,
}

impl TrainerCatalog {
    pub fn from_ron(src: &str, dex: &Pokedex) -> DataResult<Self> {
        let table: Vec<TrainerData> = ron::from_str(src).map_err(|e| DataError::Parse {
            table: "trainer",
            message: e.to_string(),
        })?;
        Self::from_tables(table, dex)
    }

    pub fn from_tables(table: Vec<TrainerData>, dex: &Pokedex) -> DataResult<Self> {
        if table.is_empty() {
            return Err(DataError::EmptyTable("trainer"));
        }
        let trainers = table
            .into_iter()
            .map(|data| Trainer::compile(data, dex))
            .collect::<DataResult<Vec<_>>>()?;
        Ok(Self { trainers })
    }

    pub fn len(&self) -> usize {
        self.trainers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trainers.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = TrainerId> + '_ {
        (0..self.trainers.len()).map(|i| TrainerId(i as u16))
    }

    /// Validates a raw trainer number.
    pub fn id(&self, raw: u16) -> GenerationResult<TrainerId> {
        if (raw as usize) < self.trainers.len() {
            Ok(TrainerId(raw))
        } else {
            Err(GenerationError::UnknownTrainer(raw))
        }
    }

    pub fn find(&self, name: &str) -> Option<TrainerId> {
        self.trainers
            .iter()
            .position(|t| t.name == name)
            .map(|i| TrainerId(i as u16))
    }

    /// Trainer for an id handed out by this catalog.
    pub fn trainer(&self, id: TrainerId) -> &Trainer {
        &self.trainers[id.index()]
    }

    pub fn get(&self, id: TrainerId) -> GenerationResult<&Trainer> {
        self.trainers
            .get(id.index())
            .ok_or(GenerationError::UnknownTrainer(id.raw()))
    }
}
