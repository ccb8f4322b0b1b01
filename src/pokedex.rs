use crate::errors::{DataError, DataResult};
use schema::{
    CompetitiveSet, EvolutionMethod, PokemonType, PresetFlags, SpeciesData, SpeciesPresets, TypeMask,
};
use std::collections::HashMap;

/// Index of a species in the [`Pokedex`]. Ordering follows the species table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpeciesId(u16);

impl SpeciesId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A resolved evolution edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evolution {
    pub into: SpeciesId,
    pub method: EvolutionMethod,
}

impl Evolution {
    /// Whether a mon at `level` may have taken this evolution.
    pub fn is_reachable(&self, level: u8, allow_items: bool) -> bool {
        match self.method {
            EvolutionMethod::Level(min_level) => level >= min_level,
            EvolutionMethod::Item(_) => allow_items,
        }
    }
}

// Guards recursive walks against malformed (cyclic) evolution data.
const MAX_CHAIN_DEPTH: u8 = 8;

/// Runtime species database built from the species and preset tables.
#[derive(Debug, Clone)]
pub struct Pokedex {
    entries: Vec<SpeciesData>,
    by_name: HashMap<String, SpeciesId>,
    evolutions: Vec<Vec<Evolution>>,
    pre_evolution: Vec<Option<SpeciesId>>,
    form_root: Vec<SpeciesId>,
    presets: Vec<Vec<CompetitiveSet>>,
}

impl Pokedex {
    pub fn from_ron(species_src: &str, presets_src: &str) -> DataResult<Self> {
        let species: Vec<SpeciesData> = ron::from_str(species_src).map_err(|e| DataError::Parse {
            table: "species",
            message: e.to_string(),
        })?;
        let presets: Vec<SpeciesPresets> =
            ron::from_str(presets_src).map_err(|e| DataError::Parse {
                table: "preset",
                message: e.to_string(),
            })?;
        Self::from_tables(species, presets)
    }

    pub fn from_tables(entries: Vec<SpeciesData>, preset_table: Vec<SpeciesPresets>) -> DataResult<Self> {
        if entries.is_empty() {
            return Err(DataError::EmptyTable("species"));
        }

        let mut by_name = HashMap::with_capacity(entries.len());
        for (i, data) in entries.iter().enumerate() {
            if by_name.insert(data.name.clone(), SpeciesId(i as u16)).is_some() {
                return Err(DataError::DuplicateSpecies(data.name.clone()));
            }
        }

        let lookup = |name: &str, context: String| -> DataResult<SpeciesId> {
            by_name.get(name).copied().ok_or_else(|| DataError::UnknownSpecies {
                name: name.to_string(),
                context,
            })
        };

        let mut evolutions = vec![Vec::new(); entries.len()];
        let mut pre_evolution = vec![None; entries.len()];
        let mut form_root = Vec::with_capacity(entries.len());

        for (i, data) in entries.iter().enumerate() {
            for evo in &data.evolutions {
                let into = lookup(&evo.evolves_into, format!("evolution of '{}'", data.name))?;
                if pre_evolution[into.index()].is_none() {
                    pre_evolution[into.index()] = Some(SpeciesId(i as u16));
                }
                evolutions[i].push(Evolution {
                    into,
                    method: evo.method.clone(),
                });
            }

            let root = match &data.form_of {
                Some(name) => lookup(name, format!("form '{}'", data.name))?,
                None => SpeciesId(i as u16),
            };
            form_root.push(root);
        }

        let mut presets = vec![Vec::new(); entries.len()];
        for entry in preset_table {
            let id = lookup(&entry.species, "the preset table".to_string())?;
            presets[id.index()].extend(entry.sets);
        }

        Ok(Self {
            entries,
            by_name,
            evolutions,
            pre_evolution,
            form_root,
            presets,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every species id in table order.
    pub fn ids(&self) -> impl Iterator<Item = SpeciesId> + '_ {
        (0..self.entries.len()).map(|i| SpeciesId(i as u16))
    }

    pub fn data(&self, id: SpeciesId) -> &SpeciesData {
        &self.entries[id.index()]
    }

    pub fn find(&self, name: &str) -> Option<SpeciesId> {
        self.by_name.get(name).copied()
    }

    /// Like [`Pokedex::find`] but reports where the bad reference came from.
    pub fn id_of(&self, name: &str, context: &str) -> DataResult<SpeciesId> {
        self.find(name).ok_or_else(|| DataError::UnknownSpecies {
            name: name.to_string(),
            context: context.to_string(),
        })
    }

    pub fn name(&self, id: SpeciesId) -> &str {
        &self.data(id).name
    }

    pub fn types(&self, id: SpeciesId) -> &[PokemonType] {
        &self.data(id).types
    }

    pub fn bst(&self, id: SpeciesId) -> u16 {
        self.data(id).stats.total()
    }

    pub fn is_legendary(&self, id: SpeciesId) -> bool {
        self.data(id).legendary
    }

    pub fn preset_flags(&self, id: SpeciesId) -> PresetFlags {
        self.data(id).flags
    }

    pub fn is_of_type(&self, id: SpeciesId, mask: TypeMask) -> bool {
        mask.matches_any(self.types(id))
    }

    /// Whether the species is part of the active ruleset.
    pub fn is_active(&self, id: SpeciesId, dex_limit: u16) -> bool {
        self.data(id).dex <= dex_limit
    }

    /// First stage of the species' evolution line.
    pub fn egg_species(&self, id: SpeciesId) -> SpeciesId {
        let mut current = id;
        for _ in 0..MAX_CHAIN_DEPTH {
            match self.pre_evolution[current.index()] {
                Some(prev) => current = prev,
                None => break,
            }
        }
        current
    }

    /// The species an alternate form belongs to, or the species itself.
    pub fn base_species(&self, id: SpeciesId) -> SpeciesId {
        self.form_root[id.index()]
    }

    pub fn evolutions(&self, id: SpeciesId) -> &[Evolution] {
        &self.evolutions[id.index()]
    }

    /// True if `target` is a later stage of `from`'s line, by any method.
    pub fn does_evolve_into(&self, from: SpeciesId, target: SpeciesId) -> bool {
        self.evolves_into_within(from, target, MAX_CHAIN_DEPTH)
    }

    fn evolves_into_within(&self, from: SpeciesId, target: SpeciesId, depth: u8) -> bool {
        if depth == 0 {
            return false;
        }
        self.evolutions(from)
            .iter()
            .any(|evo| evo.into == target || self.evolves_into_within(evo.into, target, depth - 1))
    }

    /// Number of evolution steps in the longest chain of the species' line.
    pub fn evolution_count(&self, id: SpeciesId) -> u8 {
        self.chain_depth(self.egg_species(id), MAX_CHAIN_DEPTH)
    }

    fn chain_depth(&self, id: SpeciesId, budget: u8) -> u8 {
        if budget == 0 {
            return 0;
        }
        self.evolutions(id)
            .iter()
            .map(|evo| 1 + self.chain_depth(evo.into, budget - 1))
            .max()
            .unwrap_or(0)
    }

    /// True if the species or anything it can evolve into has a type in `mask`.
    pub fn evos_contain_type(&self, id: SpeciesId, mask: TypeMask) -> bool {
        self.evos_contain_type_within(id, mask, MAX_CHAIN_DEPTH)
    }

    fn evos_contain_type_within(&self, id: SpeciesId, mask: TypeMask, depth: u8) -> bool {
        if self.is_of_type(id, mask) {
            return true;
        }
        depth > 0
            && self
                .evolutions(id)
                .iter()
                .any(|evo| self.evos_contain_type_within(evo.into, mask, depth - 1))
    }

    pub fn presets(&self, id: SpeciesId) -> &[CompetitiveSet] {
        &self.presets[id.index()]
    }

    /// Species handed out when generation runs out of options entirely.
    pub fn default_species(&self) -> SpeciesId {
        self.find("Magikarp").unwrap_or(SpeciesId(0))
    }
}
