//! Render payloads: table rows, the detail modal, and full snapshots.

use pokedex_core::{stat_label, Language, Pokemon};
use serde::Serialize;

use crate::filter::FilterCriteria;
use crate::pagination::PageInfo;

/// One table row, already formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PokemonRow {
    pub image: Option<String>,
    pub name: String,
    pub types: Vec<String>,
    pub weight: String,
    pub height: String,
    pub id: String,
}

impl PokemonRow {
    pub fn new(pokemon: &Pokemon, lang: Language) -> Self {
        Self {
            image: pokemon.sprite_url.clone(),
            name: capitalize(&pokemon.name),
            types: pokemon.types.iter().map(|t| t.label(lang).to_string()).collect(),
            weight: format!("{:.1} kg", pokemon.weight_kg()),
            height: format!("{:.1} m", pokemon.height_m()),
            id: format_id(pokemon.id),
        }
    }
}

/// Extended payload for the detail modal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PokemonDetail {
    #[serde(flatten)]
    pub row: PokemonRow,
    pub type_keys: Vec<String>,
    pub base_experience: Option<u32>,
    /// (label, base value) in API order.
    pub stats: Vec<(String, u32)>,
}

impl PokemonDetail {
    pub fn new(pokemon: &Pokemon, lang: Language) -> Self {
        Self {
            row: PokemonRow::new(pokemon, lang),
            type_keys: pokemon.types.iter().map(|t| t.key().to_string()).collect(),
            base_experience: pokemon.base_experience,
            stats: pokemon
                .stats
                .iter()
                .enumerate()
                .map(|(i, s)| (stat_label(i, lang).to_string(), s.base))
                .collect(),
        }
    }

    pub fn stat_total(&self) -> u32 {
        self.stats.iter().map(|(_, v)| v).sum()
    }
}

/// Everything a renderer needs to draw the current page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSnapshot {
    pub rows: Vec<PokemonRow>,
    pub page: PageInfo,
    pub criteria: FilterCriteria,
    pub total: usize,
    pub filtered: usize,
}

/// `#001`-style dex number.
pub fn format_id(id: u32) -> String {
    format!("#{:03}", id)
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
