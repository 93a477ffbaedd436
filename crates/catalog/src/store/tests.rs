use std::sync::{Arc, Mutex};

use pokedex_core::{Language, LookupError, Pokemon, PokemonType};

use super::{CatalogStore, RenderSink, StatusMessage};
use crate::filter::FilterCriteria;
use crate::view::CatalogSnapshot;

#[derive(Default, Clone)]
struct Recorder {
    snapshots: Arc<Mutex<Vec<CatalogSnapshot>>>,
    statuses: Arc<Mutex<Vec<StatusMessage>>>,
}

impl RenderSink for Recorder {
    fn render(&mut self, snapshot: &CatalogSnapshot) {
        self.snapshots.lock().unwrap().push(snapshot.clone());
    }

    fn status(&mut self, status: &StatusMessage) {
        self.statuses.lock().unwrap().push(status.clone());
    }
}

fn mon(id: u32, name: &str, ty: PokemonType) -> Arc<Pokemon> {
    Arc::new(Pokemon {
        id,
        name: name.to_string(),
        types: vec![ty],
        weight: 10,
        height: 10,
        sprite_url: None,
        base_experience: None,
        stats: vec![],
    })
}

/// 45 records with ids 1..=45, handed over in reverse order.
fn numbered() -> Vec<Arc<Pokemon>> {
    (1..=45)
        .rev()
        .map(|id| mon(id, &format!("mon{id}"), PokemonType::Normal))
        .collect()
}

fn store_with(records: Vec<Arc<Pokemon>>) -> (CatalogStore, Recorder) {
    let recorder = Recorder::default();
    let mut store = CatalogStore::new(20, Language::Es);
    store.subscribe(Box::new(recorder.clone()));
    store.set_catalog(records);
    (store, recorder)
}

#[test]
fn set_catalog_sorts_by_id() {
    let (store, _) = store_with(numbered());
    let ids: Vec<u32> = store.all().iter().map(|p| p.id).collect();
    assert_eq!(ids, (1..=45).collect::<Vec<_>>());
    assert_eq!(store.filtered_count(), 45);
    assert_eq!(store.page_info().current_page, 1);
}

#[test]
fn pages_through_45_records() {
    let (mut store, _) = store_with(numbered());
    assert_eq!(store.page_info().total_pages, 3);
    assert!(store.next_page());
    assert!(store.next_page());
    assert_eq!(store.visible_page().len(), 5);
    assert_eq!(store.visible_page()[0].id, 41);
    assert!(!store.next_page());
    assert_eq!(store.page_info().current_page, 3);
}

#[test]
fn prev_on_first_page_is_noop() {
    let (mut store, recorder) = store_with(numbered());
    let before = recorder.snapshots.lock().unwrap().len();
    assert!(!store.prev_page());
    assert_eq!(recorder.snapshots.lock().unwrap().len(), before);
}

#[test]
fn criteria_change_resets_page() {
    let (mut store, _) = store_with(numbered());
    store.next_page();
    store.next_page();
    store.set_search("mon1").unwrap();
    assert_eq!(store.page_info().current_page, 1);
    // mon1, mon10..mon19
    assert_eq!(store.filtered_count(), 11);
}

#[test]
fn helpers_combine_criteria() {
    let records = vec![
        mon(4, "charmander", PokemonType::Fire),
        mon(7, "squirtle", PokemonType::Water),
        mon(155, "cyndaquil", PokemonType::Fire),
    ];
    let (mut store, _) = store_with(records);
    store.set_category(Some("fire".into())).unwrap();
    assert_eq!(store.filtered_count(), 2);
    store.set_generation(Some("2".into())).unwrap();
    assert_eq!(store.filtered()[0].name, "cyndaquil");
    assert_eq!(store.criteria().category.as_deref(), Some("fire"));

    store.clear_filters();
    assert_eq!(store.filtered_count(), 3);
    assert_eq!(store.criteria(), &FilterCriteria::default());
}

#[test]
fn unknown_generation_leaves_state_untouched() {
    let (mut store, recorder) = store_with(numbered());
    store.set_search("mon4").unwrap();
    store.next_page();
    let filtered_before: Vec<u32> = store.filtered().iter().map(|p| p.id).collect();
    let criteria_before = store.criteria().clone();
    let page_before = store.page_info();
    let renders_before = recorder.snapshots.lock().unwrap().len();

    let err = store.set_generation(Some("99".into())).unwrap_err();
    assert_eq!(err, LookupError::UnknownGeneration("99".into()));

    let filtered_after: Vec<u32> = store.filtered().iter().map(|p| p.id).collect();
    assert_eq!(filtered_after, filtered_before);
    assert_eq!(store.criteria(), &criteria_before);
    assert_eq!(store.page_info(), page_before);
    assert_eq!(recorder.snapshots.lock().unwrap().len(), renders_before);
}

#[test]
fn empty_result_reports_status() {
    let (mut store, recorder) = store_with(numbered());
    store.set_search("pikachu").unwrap();
    assert_eq!(store.filtered_count(), 0);
    assert_eq!(store.page_info().total_pages, 0);
    assert!(store.visible_page().is_empty());
    assert_eq!(
        recorder.statuses.lock().unwrap().last(),
        Some(&StatusMessage::Empty)
    );
}

#[test]
fn sinks_receive_rendered_rows() {
    let (mut store, recorder) = store_with(vec![mon(25, "pikachu", PokemonType::Electric)]);
    store.set_status(StatusMessage::Ready { total: 1, failed: 0 });

    let snapshots = recorder.snapshots.lock().unwrap();
    let last = snapshots.last().unwrap();
    assert_eq!(last.rows.len(), 1);
    assert_eq!(last.rows[0].name, "Pikachu");
    assert_eq!(last.rows[0].types, vec!["Eléctrico"]);
    assert_eq!(last.total, 1);
    assert_eq!(
        recorder.statuses.lock().unwrap().as_slice(),
        &[StatusMessage::Ready { total: 1, failed: 0 }]
    );
}

#[test]
fn find_is_case_insensitive() {
    let (store, _) = store_with(vec![mon(25, "pikachu", PokemonType::Electric)]);
    assert_eq!(store.find(" Pikachu ").map(|p| p.id), Some(25));
    assert!(store.find("raichu").is_none());
}

#[test]
fn go_to_page_clamps() {
    let (mut store, _) = store_with(numbered());
    store.go_to_page(10);
    assert_eq!(store.page_info().current_page, 3);
    store.go_to_page(0);
    assert_eq!(store.page_info().current_page, 1);
}

#[test]
fn status_messages_render_in_spanish() {
    assert_eq!(
        StatusMessage::Progress { done: 3, total: 10 }.to_string(),
        "Cargando Pokémon... 3/10"
    );
    assert_eq!(
        StatusMessage::Ready { total: 10, failed: 2 }.to_string(),
        "10 Pokémon cargados (2 no se pudieron cargar)"
    );
}
