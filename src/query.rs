//! Candidate-set queries over the species database and the trainer catalog.
//!
//! A query is an owned value. Building a fresh query for each pass replaces
//! the begin/end scope pairs of a shared working set, and a [`WeightQuery`]
//! borrows the query it weighs, so the candidate set cannot change under it.

use crate::pokedex::{Pokedex, SpeciesId};
use crate::trainers::{TrainerCatalog, TrainerId};
use schema::{PresetFlags, TrainerFlags, TypeMask};
use std::collections::BTreeSet;

/// A set of candidate species.
#[derive(Debug, Clone)]
pub struct SpeciesQuery<'d> {
    dex: &'d Pokedex,
    members: BTreeSet<SpeciesId>,
}

impl<'d> SpeciesQuery<'d> {
    /// An empty candidate set.
    pub fn empty(dex: &'d Pokedex) -> Self {
        Self {
            dex,
            members: BTreeSet::new(),
        }
    }

    /// Every species in the database.
    pub fn all(dex: &'d Pokedex) -> Self {
        Self {
            dex,
            members: dex.ids().collect(),
        }
    }

    /// Every species active under the given dex limit.
    pub fn active(dex: &'d Pokedex, dex_limit: u16) -> Self {
        let mut query = Self::empty(dex);
        query.include_active(dex_limit);
        query
    }

    pub fn dex(&self) -> &'d Pokedex {
        self.dex
    }

    pub fn include_active(&mut self, dex_limit: u16) {
        let dex = self.dex;
        self.members
            .extend(dex.ids().filter(|&id| dex.is_active(id, dex_limit)));
    }

    pub fn insert(&mut self, id: SpeciesId) {
        self.members.insert(id);
    }

    pub fn remove(&mut self, id: SpeciesId) {
        self.members.remove(&id);
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Keeps only candidates for which `keep` returns true.
    pub fn retain_where(&mut self, mut keep: impl FnMut(SpeciesId) -> bool) {
        self.members.retain(|&id| keep(id));
    }

    /// Drops candidates for which `drop` returns true.
    pub fn exclude_where(&mut self, mut drop: impl FnMut(SpeciesId) -> bool) {
        self.members.retain(|&id| !drop(id));
    }

    pub fn retain_types(&mut self, mask: TypeMask) {
        let dex = self.dex;
        self.retain_where(|id| dex.is_of_type(id, mask));
    }

    pub fn exclude_types(&mut self, mask: TypeMask) {
        if mask.is_empty() {
            return;
        }
        let dex = self.dex;
        self.exclude_where(|id| dex.is_of_type(id, mask));
    }

    /// Keeps candidates whose evolution line reaches a type in `mask`.
    pub fn retain_evos_contain_type(&mut self, mask: TypeMask) {
        let dex = self.dex;
        self.retain_where(|id| dex.evos_contain_type(id, mask));
    }

    pub fn retain_legendary(&mut self) {
        let dex = self.dex;
        self.retain_where(|id| dex.is_legendary(id));
    }

    pub fn exclude_legendary(&mut self) {
        let dex = self.dex;
        self.exclude_where(|id| dex.is_legendary(id));
    }

    /// Drops legendaries that lack `flags`. Non-legendary candidates are untouched.
    pub fn retain_legendary_with_flags(&mut self, flags: PresetFlags) {
        let dex = self.dex;
        self.exclude_where(|id| dex.is_legendary(id) && !dex.preset_flags(id).contains(flags));
    }

    /// Drops legendaries that carry `flags`. Non-legendary candidates are untouched.
    pub fn exclude_legendary_with_flags(&mut self, flags: PresetFlags) {
        let dex = self.dex;
        self.exclude_where(|id| dex.is_legendary(id) && dex.preset_flags(id).contains(flags));
    }

    pub fn retain_preset_flags(&mut self, flags: PresetFlags) {
        let dex = self.dex;
        self.retain_where(|id| dex.preset_flags(id).contains(flags));
    }

    /// Replaces every candidate with the first stage of its evolution line.
    pub fn transform_into_egg_species(&mut self) {
        let dex = self.dex;
        self.members = self.members.iter().map(|&id| dex.egg_species(id)).collect();
    }

    /// Replaces every candidate with the furthest stages it could have reached
    /// by `level`. Branching lines keep every reachable branch. Evolutions into
    /// species outside the dex limit are not taken.
    pub fn transform_into_evos(&mut self, level: u8, allow_items: bool, dex_limit: u16) {
        let mut evolved = BTreeSet::new();
        for &id in &self.members {
            self.collect_final_forms(id, level, allow_items, dex_limit, 8, &mut evolved);
        }
        self.members = evolved;
    }

    fn collect_final_forms(
        &self,
        id: SpeciesId,
        level: u8,
        allow_items: bool,
        dex_limit: u16,
        depth: u8,
        out: &mut BTreeSet<SpeciesId>,
    ) {
        let dex = self.dex;
        let mut next = dex
            .evolutions(id)
            .iter()
            .filter(|evo| evo.is_reachable(level, allow_items) && dex.is_active(evo.into, dex_limit))
            .peekable();

        if depth == 0 || next.peek().is_none() {
            out.insert(id);
            return;
        }

        for evo in next {
            self.collect_final_forms(evo.into, level, allow_items, dex_limit, depth - 1, out);
        }
    }

    pub fn contains(&self, id: SpeciesId) -> bool {
        self.members.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Candidates in species-table order.
    pub fn iter(&self) -> impl Iterator<Item = SpeciesId> + '_ {
        self.members.iter().copied()
    }

    /// Starts weighing the current candidates. All weights start at zero.
    pub fn weights(&self) -> WeightQuery<'_> {
        WeightQuery {
            query: self,
            weights: vec![0; self.members.len()],
        }
    }
}

/// Per-candidate weights over a borrowed [`SpeciesQuery`].
#[derive(Debug)]
pub struct WeightQuery<'q> {
    query: &'q SpeciesQuery<'q>,
    weights: Vec<u8>,
}

impl<'q> WeightQuery<'q> {
    pub fn fill(&mut self, weight: u8) {
        self.weights.iter_mut().for_each(|w| *w = weight);
    }

    /// Sets every weight from `weigh(index, species)`.
    pub fn calculate(&mut self, mut weigh: impl FnMut(usize, SpeciesId) -> u8) {
        for (i, (species, weight)) in self.query.iter().zip(self.weights.iter_mut()).enumerate() {
            *weight = weigh(i, species);
        }
    }

    pub fn total(&self) -> u32 {
        self.weights.iter().map(|&w| w as u32).sum()
    }

    pub fn has_any(&self) -> bool {
        self.weights.iter().any(|&w| w != 0)
    }

    pub fn has_multiple(&self) -> bool {
        self.weights.iter().filter(|&&w| w != 0).count() > 1
    }

    /// Weighted draw. `random` is reduced modulo the total weight, so 0 picks
    /// the first candidate with a non-zero weight.
    pub fn select(&self, random: u32) -> Option<SpeciesId> {
        let total = self.total();
        if total == 0 {
            return None;
        }

        let mut target = random % total;
        for (species, &weight) in self.query.iter().zip(&self.weights) {
            let weight = weight as u32;
            if target < weight {
                return Some(species);
            }
            target -= weight;
        }
        None
    }
}

/// A set of candidate trainers.
#[derive(Debug, Clone)]
pub struct TrainerQuery<'c> {
    catalog: &'c TrainerCatalog,
    members: BTreeSet<TrainerId>,
}

impl<'c> TrainerQuery<'c> {
    pub fn all(catalog: &'c TrainerCatalog) -> Self {
        Self {
            catalog,
            members: catalog.ids().collect(),
        }
    }

    /// Keeps trainers carrying at least one of `flags`. An empty mask leaves the set unchanged.
    pub fn retain_flags(&mut self, flags: TrainerFlags) {
        if flags.is_empty() {
            return;
        }
        let catalog = self.catalog;
        self.members
            .retain(|&id| catalog.trainer(id).flags.intersects(flags));
    }

    /// Drops trainers carrying any of `flags`.
    pub fn exclude_flags(&mut self, flags: TrainerFlags) {
        let catalog = self.catalog;
        self.members
            .retain(|&id| !catalog.trainer(id).flags.intersects(flags));
    }

    pub fn exclude_type_group(&mut self, key: u16) {
        let catalog = self.catalog;
        self.members
            .retain(|&id| catalog.trainer(id).type_group_key(id) != key);
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = TrainerId> + '_ {
        self.members.iter().copied()
    }

    /// Uniform draw in catalog order.
    pub fn select(&self, random: u32) -> Option<TrainerId> {
        if self.members.is_empty() {
            return None;
        }
        let index = random as usize % self.members.len();
        self.members.iter().nth(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameData;
    use pretty_assertions::assert_eq;

    fn names(query: &SpeciesQuery) -> Vec<String> {
        query.iter().map(|id| query.dex().name(id).to_string()).collect()
    }

    fn only<'a>(dex: &'a Pokedex, species: &[&str]) -> SpeciesQuery<'a> {
        let mut query = SpeciesQuery::empty(dex);
        for name in species {
            query.insert(dex.find(name).unwrap());
        }
        query
    }

    #[test]
    fn test_active_respects_dex_limit() {
        let data = GameData::embedded().unwrap();
        let dex = &data.pokedex;
        let kanto = SpeciesQuery::active(dex, 151);
        assert!(kanto.contains(dex.find("Mew").unwrap()));
        assert!(!kanto.contains(dex.find("Steelix").unwrap()));
        assert!(kanto.len() < SpeciesQuery::all(dex).len());
    }

    #[test]
    fn test_type_filters() {
        let data = GameData::embedded().unwrap();
        let dex = &data.pokedex;
        let mut query = only(dex, &["Charizard", "Blastoise", "Pidgeot", "Onix"]);

        query.retain_types(TypeMask::FLYING | TypeMask::WATER);
        assert_eq!(names(&query), vec!["Charizard", "Blastoise", "Pidgeot"]);

        query.exclude_types(TypeMask::FIRE);
        assert_eq!(names(&query), vec!["Blastoise", "Pidgeot"]);

        query.exclude_types(TypeMask::empty());
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_legendary_filters() {
        let data = GameData::embedded().unwrap();
        let dex = &data.pokedex;
        let base = only(dex, &["Mewtwo", "Articuno", "Gyarados"]);

        let mut strong_only = base.clone();
        strong_only.retain_legendary_with_flags(PresetFlags::SINGLES_STRONG);
        assert_eq!(names(&strong_only), vec!["Gyarados", "Mewtwo"]);

        let mut weak_only = base.clone();
        weak_only.exclude_legendary_with_flags(PresetFlags::SINGLES_STRONG);
        assert_eq!(names(&weak_only), vec!["Gyarados", "Articuno"]);

        let mut legends = base.clone();
        legends.retain_legendary();
        assert_eq!(names(&legends), vec!["Articuno", "Mewtwo"]);

        let mut no_legends = base;
        no_legends.exclude_legendary();
        assert_eq!(names(&no_legends), vec!["Gyarados"]);
    }

    #[test]
    fn test_transform_into_evos_by_level() {
        let data = GameData::embedded().unwrap();
        let dex = &data.pokedex;

        let mut query = only(dex, &["Charmeleon", "Wurmple"]);
        query.transform_into_egg_species();
        assert_eq!(names(&query), vec!["Charmander", "Wurmple"]);

        let mut low = query.clone();
        low.transform_into_evos(5, false, 386);
        assert_eq!(names(&low), vec!["Charmander", "Wurmple"]);

        let mut mid = query.clone();
        mid.transform_into_evos(8, false, 386);
        assert_eq!(names(&mid), vec!["Charmander", "Silcoon", "Cascoon"]);

        let mut high = query;
        high.transform_into_evos(40, false, 386);
        assert_eq!(names(&high), vec!["Charizard", "Beautifly", "Dustox"]);
    }

    #[test]
    fn test_transform_into_evos_item_policy_and_dex_limit() {
        let data = GameData::embedded().unwrap();
        let dex = &data.pokedex;

        let mut no_items = only(dex, &["Onix"]);
        no_items.transform_into_evos(100, false, 386);
        assert_eq!(names(&no_items), vec!["Onix"]);

        let mut items = only(dex, &["Onix"]);
        items.transform_into_evos(100, true, 386);
        assert_eq!(names(&items), vec!["Steelix"]);

        let mut limited = only(dex, &["Onix"]);
        limited.transform_into_evos(100, true, 151);
        assert_eq!(names(&limited), vec!["Onix"]);
    }

    #[test]
    fn test_evos_contain_type() {
        let data = GameData::embedded().unwrap();
        let dex = &data.pokedex;
        let mut query = only(dex, &["Charmander", "Squirtle", "Onix"]);
        query.retain_evos_contain_type(TypeMask::FLYING | TypeMask::STEEL);
        assert_eq!(names(&query), vec!["Charmander", "Onix"]);
    }

    #[test]
    fn test_weighted_selection() {
        let data = GameData::embedded().unwrap();
        let dex = &data.pokedex;
        let query = only(dex, &["Bulbasaur", "Charmander", "Squirtle"]);

        let mut weights = query.weights();
        assert!(!weights.has_any());
        assert_eq!(weights.select(0), None);

        weights.calculate(|i, _| (i as u8 + 1) * 2);
        assert_eq!(weights.total(), 12);
        assert!(weights.has_multiple());
        // Bulbasaur owns 0..2, Charmander 2..6, Squirtle 6..12.
        assert_eq!(weights.select(1), dex.find("Bulbasaur"));
        assert_eq!(weights.select(5), dex.find("Charmander"));
        assert_eq!(weights.select(11), dex.find("Squirtle"));
        assert_eq!(weights.select(12), dex.find("Bulbasaur"));
    }

    #[test]
    fn test_select_zero_picks_first_nonzero() {
        let data = GameData::embedded().unwrap();
        let dex = &data.pokedex;
        let beautifly = dex.find("Beautifly").unwrap();
        let query = only(dex, &["Silcoon", "Cascoon"]);

        let mut weights = query.weights();
        weights.fill(1);
        assert!(weights.has_multiple());
        weights.calculate(|_, species| dex.does_evolve_into(species, beautifly) as u8);
        assert!(weights.has_any());
        assert!(!weights.has_multiple());
        assert_eq!(weights.select(0), dex.find("Silcoon"));
    }

    #[test]
    fn test_trainer_query_filters() {
        let data = GameData::embedded().unwrap();
        let catalog = &data.trainers;

        let mut query = TrainerQuery::all(catalog);
        query.retain_flags(TrainerFlags::CLASS_GYM_1);
        query.retain_flags(TrainerFlags::REGION_KANTO);
        let picked: Vec<&str> = query.iter().map(|id| catalog.trainer(id).name.as_str()).collect();
        assert_eq!(picked, vec!["Brock"]);

        let mut rock_free = TrainerQuery::all(catalog);
        rock_free.retain_flags(TrainerFlags::CLASS_GYM_1);
        rock_free.exclude_type_group(schema::PokemonType::Rock.index() as u16);
        assert!(rock_free
            .iter()
            .all(|id| catalog.trainer(id).type_group != Some(schema::PokemonType::Rock)));
        assert!(!rock_free.is_empty());

        let mut nobody = TrainerQuery::all(catalog);
        nobody.retain_flags(TrainerFlags::CLASS_RIVAL);
        nobody.exclude_flags(TrainerFlags::CLASS_RIVAL);
        assert!(nobody.is_empty());
        assert_eq!(nobody.select(7), None);
    }
}
