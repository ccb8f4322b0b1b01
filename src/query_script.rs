//! Data-driven query and weight scripts attached to trainer team generators.
//!
//! Scripts are compiled once when the trainer catalog loads, which resolves
//! species names to ids and reports unknown names up front.

use crate::errors::DataResult;
use crate::pokedex::{Pokedex, SpeciesId};
use crate::query::SpeciesQuery;
use schema::{QueryScriptOp, TypeMask, WeightScriptOp};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOp {
    IncludeActive,
    IncludeSpecies(Vec<SpeciesId>),
    ExcludeSpecies(Vec<SpeciesId>),
    RetainTypes(TypeMask),
    ExcludeTypes(TypeMask),
    RetainLegendary,
    ExcludeLegendary,
    ExcludePartyTypes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeightOp {
    Base(u8),
    TypeBonus(TypeMask, u8),
    SpeciesBonus(Vec<SpeciesId>, u8),
    CoverageBonus(u8),
}

/// What a script can see of the generation in progress.
#[derive(Debug, Clone, Copy)]
pub struct ScriptContext {
    pub dex_limit: u16,
    /// Types of the party built so far. Empty unless the trainer optimizes coverage.
    pub party_types: TypeMask,
}

impl ScriptContext {
    pub fn new(dex: &Pokedex, dex_limit: u16, party: &[SpeciesId]) -> Self {
        let party_types = party
            .iter()
            .flat_map(|&id| dex.types(id).iter())
            .fold(TypeMask::empty(), |mask, &t| mask | t.mask());
        Self {
            dex_limit,
            party_types,
        }
    }
}

fn resolve_names(dex: &Pokedex, names: &[String], context: &str) -> DataResult<Vec<SpeciesId>> {
    names.iter().map(|name| dex.id_of(name, context)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryScript {
    ops: Vec<QueryOp>,
}

impl QueryScript {
    pub fn compile(ops: &[QueryScriptOp], dex: &Pokedex, context: &str) -> DataResult<Self> {
        let ops = ops
            .iter()
            .map(|op| {
                Ok(match op {
                    QueryScriptOp::IncludeActive => QueryOp::IncludeActive,
                    QueryScriptOp::IncludeSpecies(names) => {
                        QueryOp::IncludeSpecies(resolve_names(dex, names, context)?)
                    }
                    QueryScriptOp::ExcludeSpecies(names) => {
                        QueryOp::ExcludeSpecies(resolve_names(dex, names, context)?)
                    }
                    QueryScriptOp::RetainTypes(mask) => QueryOp::RetainTypes(*mask),
                    QueryScriptOp::ExcludeTypes(mask) => QueryOp::ExcludeTypes(*mask),
                    QueryScriptOp::RetainLegendary => QueryOp::RetainLegendary,
                    QueryScriptOp::ExcludeLegendary => QueryOp::ExcludeLegendary,
                    QueryScriptOp::ExcludePartyTypes => QueryOp::ExcludePartyTypes,
                })
            })
            .collect::<DataResult<Vec<_>>>()?;
        Ok(Self { ops })
    }

    pub fn ops(&self) -> &[QueryOp] {
        &self.ops
    }

    pub fn execute(&self, query: &mut SpeciesQuery, context: &ScriptContext) {
        for op in &self.ops {
            match op {
                QueryOp::IncludeActive => query.include_active(context.dex_limit),
                QueryOp::IncludeSpecies(ids) => ids.iter().for_each(|&id| query.insert(id)),
                QueryOp::ExcludeSpecies(ids) => ids.iter().for_each(|&id| query.remove(id)),
                QueryOp::RetainTypes(mask) => query.retain_types(*mask),
                QueryOp::ExcludeTypes(mask) => query.exclude_types(*mask),
                QueryOp::RetainLegendary => query.retain_legendary(),
                QueryOp::ExcludeLegendary => query.exclude_legendary(),
                QueryOp::ExcludePartyTypes => query.exclude_types(context.party_types),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightScript {
    ops: Vec<WeightOp>,
}

impl WeightScript {
    pub fn compile(ops: &[WeightScriptOp], dex: &Pokedex, context: &str) -> DataResult<Self> {
        let ops = ops
            .iter()
            .map(|op| {
                Ok(match op {
                    WeightScriptOp::Base(w) => WeightOp::Base(*w),
                    WeightScriptOp::TypeBonus(mask, w) => WeightOp::TypeBonus(*mask, *w),
                    WeightScriptOp::SpeciesBonus(names, w) => {
                        WeightOp::SpeciesBonus(resolve_names(dex, names, context)?, *w)
                    }
                    WeightScriptOp::CoverageBonus(w) => WeightOp::CoverageBonus(*w),
                })
            })
            .collect::<DataResult<Vec<_>>>()?;
        Ok(Self { ops })
    }

    /// Weight of one candidate. Starts at zero and saturates at 255.
    pub fn weigh(&self, dex: &Pokedex, species: SpeciesId, context: &ScriptContext) -> u8 {
        self.ops.iter().fold(0u8, |weight, op| {
            let bonus = match op {
                WeightOp::Base(w) => *w,
                WeightOp::TypeBonus(mask, w) if dex.is_of_type(species, *mask) => *w,
                WeightOp::SpeciesBonus(ids, w) if ids.contains(&species) => *w,
                WeightOp::CoverageBonus(w) if !dex.is_of_type(species, context.party_types) => *w,
                _ => 0,
            };
            weight.saturating_add(bonus)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameData;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compile_resolves_names() {
        let data = GameData::embedded().unwrap();
        let dex = &data.pokedex;
        let script = QueryScript::compile(
            &[QueryScriptOp::IncludeSpecies(vec!["Ditto".to_string()])],
            dex,
            "test",
        )
        .unwrap();
        assert_eq!(script.ops(), &[QueryOp::IncludeSpecies(vec![dex.find("Ditto").unwrap()])]);

        let err = QueryScript::compile(
            &[QueryScriptOp::ExcludeSpecies(vec!["Agumon".to_string()])],
            dex,
            "trainer 'Tester'",
        )
        .unwrap_err();
        assert!(err.to_string().contains("Agumon"));
    }

    #[test]
    fn test_query_script_edits_set() {
        let data = GameData::embedded().unwrap();
        let dex = &data.pokedex;
        let script = QueryScript::compile(
            &[
                QueryScriptOp::IncludeActive,
                QueryScriptOp::RetainTypes(TypeMask::DRAGON),
                QueryScriptOp::ExcludeLegendary,
                QueryScriptOp::ExcludeSpecies(vec!["Dratini".to_string()]),
            ],
            dex,
            "test",
        )
        .unwrap();

        let mut query = SpeciesQuery::empty(dex);
        script.execute(&mut query, &ScriptContext::new(dex, 151, &[]));
        let names: Vec<&str> = query.iter().map(|id| dex.name(id)).collect();
        assert_eq!(names, vec!["Dragonair", "Dragonite"]);
    }

    #[test]
    fn test_exclude_party_types_uses_context() {
        let data = GameData::embedded().unwrap();
        let dex = &data.pokedex;
        let script =
            QueryScript::compile(&[QueryScriptOp::ExcludePartyTypes], dex, "test").unwrap();
        let charmander = dex.find("Charmander").unwrap();
        let squirtle = dex.find("Squirtle").unwrap();

        let mut query = SpeciesQuery::empty(dex);
        query.insert(charmander);
        query.insert(squirtle);

        // Without a party nothing is excluded.
        script.execute(&mut query, &ScriptContext::new(dex, 386, &[]));
        assert_eq!(query.len(), 2);

        let vulpix = dex.find("Vulpix").unwrap();
        script.execute(&mut query, &ScriptContext::new(dex, 386, &[vulpix]));
        assert!(!query.contains(charmander));
        assert!(query.contains(squirtle));
    }

    #[test]
    fn test_weight_script() {
        let data = GameData::embedded().unwrap();
        let dex = &data.pokedex;
        let script = WeightScript::compile(
            &[
                WeightScriptOp::Base(2),
                WeightScriptOp::TypeBonus(TypeMask::ROCK, 4),
                WeightScriptOp::SpeciesBonus(vec!["Onix".to_string()], 250),
                WeightScriptOp::CoverageBonus(8),
            ],
            dex,
            "test",
        )
        .unwrap();

        let geodude = dex.find("Geodude").unwrap();
        let onix = dex.find("Onix").unwrap();
        let diglett = dex.find("Diglett").unwrap();
        let party = ScriptContext::new(dex, 386, &[diglett]);

        // Geodude is Rock/Ground, so the Ground party member blocks the coverage bonus.
        assert_eq!(script.weigh(dex, geodude, &party), 6);
        assert_eq!(script.weigh(dex, onix, &party), 255);
        assert_eq!(script.weigh(dex, diglett, &ScriptContext::new(dex, 386, &[])), 10);
    }
}
