use std::fmt;
use std::sync::Arc;

use pokedex_core::{Language, LookupError, Pokemon};
use tracing::{debug, info};

use crate::filter::{self, FilterCriteria};
use crate::pagination::{self, PageInfo, Pagination};
use crate::view::{CatalogSnapshot, PokemonDetail, PokemonRow};

/// Receives state changes from a [`CatalogStore`].
///
/// `render` is called after every change to the visible page;
/// `status` carries transient loading and error messages.
pub trait RenderSink: Send {
    fn render(&mut self, snapshot: &CatalogSnapshot);

    fn status(&mut self, _status: &StatusMessage) {}
}

/// Transient status line shown next to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Loading,
    Progress { done: usize, total: usize },
    Ready { total: usize, failed: usize },
    /// A valid filter matched nothing.
    Empty,
    Error(String),
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusMessage::Loading => write!(f, "Cargando Pokémon..."),
            StatusMessage::Progress { done, total } => {
                write!(f, "Cargando Pokémon... {}/{}", done, total)
            }
            StatusMessage::Ready { total, failed: 0 } => write!(f, "{} Pokémon cargados", total),
            StatusMessage::Ready { total, failed } => {
                write!(f, "{} Pokémon cargados ({} no se pudieron cargar)", total, failed)
            }
            StatusMessage::Empty => write!(f, "No se encontraron Pokémon"),
            StatusMessage::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}

/// Owns the loaded catalog and all derived view state.
///
/// The full list is sorted by id once and never touched again; every
/// filter change builds a fresh filtered list from it. All mutation
/// goes through `&mut self`, so the owner decides when state changes.
pub struct CatalogStore {
    all: Vec<Arc<Pokemon>>,
    filtered: Vec<Arc<Pokemon>>,
    criteria: FilterCriteria,
    pagination: Pagination,
    language: Language,
    sinks: Vec<Box<dyn RenderSink>>,
}

impl CatalogStore {
    pub fn new(page_size: usize, language: Language) -> Self {
        Self {
            all: Vec::new(),
            filtered: Vec::new(),
            criteria: FilterCriteria::default(),
            pagination: Pagination::new(page_size),
            language,
            sinks: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, sink: Box<dyn RenderSink>) {
        self.sinks.push(sink);
    }

    // ── Loading ─────────────────────────────────────────────────

    /// Replace the catalog. Records are sorted by id and any active
    /// criteria are cleared.
    pub fn set_catalog(&mut self, mut records: Vec<Arc<Pokemon>>) {
        records.sort_by_key(|p| p.id);
        info!(count = records.len(), "Catalog loaded");
        self.filtered = records.clone();
        self.all = records;
        self.criteria = FilterCriteria::default();
        self.pagination.reset();
        self.notify();
    }

    pub fn set_status(&mut self, status: StatusMessage) {
        for sink in &mut self.sinks {
            sink.status(&status);
        }
    }

    // ── Filtering ───────────────────────────────────────────────

    /// Recompute the filtered list. On a lookup error nothing changes.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> Result<(), LookupError> {
        let filtered = filter::apply(&self.all, &criteria)?;
        debug!(?criteria, matched = filtered.len(), "Filter applied");
        self.filtered = filtered;
        self.criteria = criteria;
        self.pagination.reset();
        self.notify();
        if self.filtered.is_empty() && !self.all.is_empty() {
            self.set_status(StatusMessage::Empty);
        }
        Ok(())
    }

    pub fn set_search(&mut self, search: impl Into<String>) -> Result<(), LookupError> {
        let criteria = FilterCriteria {
            search: search.into(),
            ..self.criteria.clone()
        };
        self.set_criteria(criteria)
    }

    pub fn set_category(&mut self, category: Option<String>) -> Result<(), LookupError> {
        let criteria = FilterCriteria {
            category,
            ..self.criteria.clone()
        };
        self.set_criteria(criteria)
    }

    pub fn set_generation(&mut self, generation: Option<String>) -> Result<(), LookupError> {
        let criteria = FilterCriteria {
            generation,
            ..self.criteria.clone()
        };
        self.set_criteria(criteria)
    }

    pub fn clear_filters(&mut self) {
        self.filtered = self.all.clone();
        self.criteria = FilterCriteria::default();
        self.pagination.reset();
        self.notify();
    }

    // ── Navigation ──────────────────────────────────────────────

    pub fn next_page(&mut self) -> bool {
        let total = pagination::total_pages(self.filtered.len(), self.pagination.page_size());
        let moved = self.pagination.next(total);
        if moved {
            self.notify();
        }
        moved
    }

    pub fn prev_page(&mut self) -> bool {
        let moved = self.pagination.prev();
        if moved {
            self.notify();
        }
        moved
    }

    pub fn go_to_page(&mut self, page: usize) {
        let total = pagination::total_pages(self.filtered.len(), self.pagination.page_size());
        let before = self.pagination.page();
        self.pagination.go_to(page, total);
        if self.pagination.page() != before {
            self.notify();
        }
    }

    // ── Read access ─────────────────────────────────────────────

    pub fn all(&self) -> &[Arc<Pokemon>] {
        &self.all
    }

    pub fn filtered(&self) -> &[Arc<Pokemon>] {
        &self.filtered
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn total_count(&self) -> usize {
        self.all.len()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn visible_page(&self) -> &[Arc<Pokemon>] {
        pagination::slice(
            &self.filtered,
            self.pagination.page(),
            self.pagination.page_size(),
        )
    }

    pub fn page_info(&self) -> PageInfo {
        self.pagination.info(self.filtered.len())
    }

    /// Case-insensitive lookup by exact name among loaded records.
    pub fn find(&self, name: &str) -> Option<&Arc<Pokemon>> {
        let name = name.trim().to_lowercase();
        self.all.iter().find(|p| p.name == name)
    }

    pub fn detail(&self, pokemon: &Pokemon) -> PokemonDetail {
        PokemonDetail::new(pokemon, self.language)
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            rows: self
                .visible_page()
                .iter()
                .map(|p| PokemonRow::new(p, self.language))
                .collect(),
            page: self.page_info(),
            criteria: self.criteria.clone(),
            total: self.all.len(),
            filtered: self.filtered.len(),
        }
    }

    fn notify(&mut self) {
        if self.sinks.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for sink in &mut self.sinks {
            sink.render(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests;
