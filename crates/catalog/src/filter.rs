//! Pure filter engine over the loaded catalog.

use std::sync::Arc;

use pokedex_core::{Generation, LookupError, Pokemon, PokemonType};
use serde::Serialize;

/// Transient filter input. Empty strings count as "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub search: String,
    pub category: Option<String>,
    pub generation: Option<String>,
}

impl FilterCriteria {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_generation(mut self, generation: impl Into<String>) -> Self {
        self.generation = Some(generation.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && set(&self.category).is_none() && set(&self.generation).is_none()
    }

    /// Resolve keys up front so a bad key fails before any record is examined.
    pub fn compile(&self) -> Result<CompiledFilter, LookupError> {
        let category = set(&self.category).map(str::parse::<PokemonType>).transpose()?;
        let generation = set(&self.generation).map(Generation::lookup).transpose()?;
        Ok(CompiledFilter {
            needle: self.search.to_lowercase().trim().to_string(),
            category,
            generation,
        })
    }
}

fn set(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Criteria with every key resolved against the static tables.
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    needle: String,
    category: Option<PokemonType>,
    generation: Option<&'static Generation>,
}

impl CompiledFilter {
    pub fn matches(&self, pokemon: &Pokemon) -> bool {
        let name_ok = self.needle.is_empty() || pokemon.name.to_lowercase().contains(&self.needle);
        let type_ok = self.category.map_or(true, |ty| pokemon.has_type(ty));
        let gen_ok = self.generation.map_or(true, |g| g.contains(pokemon.id));
        name_ok && type_ok && gen_ok
    }
}

/// Filter `full` by `criteria`, keeping input order.
pub fn apply(
    full: &[Arc<Pokemon>],
    criteria: &FilterCriteria,
) -> Result<Vec<Arc<Pokemon>>, LookupError> {
    let filter = criteria.compile()?;
    Ok(full.iter().filter(|p| filter.matches(p)).cloned().collect())
}
