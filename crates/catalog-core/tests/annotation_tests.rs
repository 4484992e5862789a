use catalog_core::constants::STICKY_STORAGE_KEY;
use catalog_core::*;
use std::sync::Arc;
use tempfile::TempDir;

fn memory() -> Arc<dyn Storage> {
    Arc::new(MemoryStorage::new())
}

#[test]
fn test_add_assigns_sequential_ids() {
    let mut store = AnnotationStore::load(memory());
    assert_eq!(store.add(3, 10.0, 20.0), "sticky-0");
    assert_eq!(store.add(3, 30.0, 40.0), "sticky-1");
    assert_eq!(store.add(5, 0.0, 0.0), "sticky-2");
    assert_eq!(store.len(), 3);

    let note = store.find(3, "sticky-0").unwrap();
    assert_eq!(note.text, "");
    assert_eq!(note.color, "yellow");
}

#[test]
fn test_deleted_id_is_never_reused() {
    let mut store = AnnotationStore::load(memory());
    let id = store.add(3, 10.0, 10.0);
    store.delete(3, &id);

    assert!(store.list_all().iter().all(|(_, note)| note.id != id));
    assert!(store.is_empty());

    let next = store.add(3, 10.0, 10.0);
    assert_ne!(next, id);
}

#[test]
fn test_list_all_orders_by_page_then_creation() {
    let mut store = AnnotationStore::load(memory());
    let a = store.add(5, 0.0, 0.0);
    let b = store.add(3, 0.0, 0.0);
    let c = store.add(5, 1.0, 1.0);
    let d = store.add(4, 0.0, 0.0);

    let listed: Vec<(u32, String)> = store
        .list_all()
        .into_iter()
        .map(|(page, note)| (page, note.id.clone()))
        .collect();
    assert_eq!(listed, vec![(3, b), (4, d), (5, a), (5, c)]);
}

#[test]
fn test_updates_are_applied_and_persisted() {
    let storage = memory();
    let mut store = AnnotationStore::load(storage.clone());
    let id = store.add(4, 1.0, 2.0);

    store.update_text(4, &id, "Check pricing");
    store.update_color(4, &id, "pink");
    store.update_position(4, &id, 50.0, 60.0);

    let reloaded = AnnotationStore::load(storage);
    let note = reloaded.find(4, &id).unwrap();
    assert_eq!(note.text, "Check pricing");
    assert_eq!(note.color, "pink");
    assert_eq!((note.x, note.y), (50.0, 60.0));
}

#[test]
fn test_stale_targets_are_ignored() {
    let mut store = AnnotationStore::load(memory());
    let id = store.add(3, 0.0, 0.0);

    store.update_text(4, &id, "wrong page");
    store.update_text(3, "sticky-99", "unknown id");
    store.delete(6, &id);
    store.delete(3, "sticky-99");

    let note = store.find(3, &id).unwrap();
    assert_eq!(note.text, "");
    assert_eq!(store.len(), 1);
}

#[test]
fn test_reload_restores_notes_and_counter() {
    let storage = memory();
    let mut store = AnnotationStore::load(storage.clone());
    store.add_with(3, 1.0, 1.0, "first", "blue");
    store.add_with(3, 2.0, 2.0, "second", "green");
    store.add_with(6, 3.0, 3.0, "third", "yellow");
    let deleted = store.add(4, 0.0, 0.0);
    store.delete(4, &deleted);

    let before: Vec<(u32, StickyNote)> = store
        .list_all()
        .into_iter()
        .map(|(page, note)| (page, note.clone()))
        .collect();
    drop(store);

    let mut restored = AnnotationStore::load(storage);
    let after: Vec<(u32, StickyNote)> = restored
        .list_all()
        .into_iter()
        .map(|(page, note)| (page, note.clone()))
        .collect();
    assert_eq!(before, after);

    // Highest surviving id is sticky-2
    assert_eq!(restored.next_id(), 3);
    assert_eq!(restored.add(3, 0.0, 0.0), "sticky-3");
}

#[test]
fn test_snapshot_json_shape() {
    let mut store = AnnotationStore::load(memory());
    store.add_with(3, 10.0, 20.0, "hello", "pink");

    let json: serde_json::Value = serde_json::from_str(&store.to_json().unwrap()).unwrap();
    let note = &json["3"][0];
    assert_eq!(note["id"], "sticky-0");
    assert_eq!(note["text"], "hello");
    assert_eq!(note["color"], "pink");
}

#[test]
fn test_counter_skips_past_restored_ids() {
    let storage = memory();
    storage
        .set(
            STICKY_STORAGE_KEY,
            r#"{"3":[{"id":"sticky-7","x":1,"y":2}],"5":[{"id":"sticky-2","x":0,"y":0,"text":"a","color":"blue"}]}"#,
        )
        .unwrap();

    let mut store = AnnotationStore::load(storage);
    assert_eq!(store.next_id(), 8);
    assert_eq!(store.find(3, "sticky-7").unwrap().color, "yellow");
    assert_eq!(store.add(3, 0.0, 0.0), "sticky-8");
}

#[test]
fn test_corrupt_snapshot_starts_empty() {
    let storage = memory();
    storage.set(STICKY_STORAGE_KEY, "{not json").unwrap();

    let mut store = AnnotationStore::load(storage);
    assert!(store.is_empty());
    assert_eq!(store.add(3, 0.0, 0.0), "sticky-0");
}

#[test]
fn test_snapshot_with_exhausted_counter_starts_empty() {
    let storage = memory();
    storage
        .set(
            STICKY_STORAGE_KEY,
            r#"{"3":[{"id":"sticky-18446744073709551615","x":1,"y":2}]}"#,
        )
        .unwrap();

    let mut store = AnnotationStore::load(storage);
    assert!(store.is_empty());
    assert_eq!(store.next_id(), 0);
    assert_eq!(store.add(3, 0.0, 0.0), "sticky-0");
}

#[test]
fn test_counter_reaching_max_reuses_free_ids() {
    let storage = memory();
    storage
        .set(
            STICKY_STORAGE_KEY,
            r#"{"3":[{"id":"sticky-0","x":0,"y":0},{"id":"sticky-18446744073709551614","x":1,"y":2}]}"#,
        )
        .unwrap();

    let mut store = AnnotationStore::load(storage);
    assert_eq!(store.next_id(), u64::MAX);
    assert_eq!(store.add(3, 0.0, 0.0), "sticky-18446744073709551615");
    assert_eq!(store.add(3, 0.0, 0.0), "sticky-1");
    assert_eq!(store.len(), 4);
}

#[test]
fn test_sticky_layer_renders_each_note_once() {
    let mut store = AnnotationStore::load(memory());
    let mut layer = StickyLayer::new();
    let first = store.add(3, 0.0, 0.0);

    assert_eq!(layer.render_page(3, store.notes_for(3)).len(), 1);
    assert!(layer.render_page(3, store.notes_for(3)).is_empty());

    let second = store.add(3, 5.0, 5.0);
    let created = layer.render_page(3, store.notes_for(3));
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].id, second);

    store.delete(3, &first);
    layer.render_page(3, store.notes_for(3));
    assert!(!layer.is_rendered(3, &first));
    assert!(layer.is_rendered(3, &second));
}

#[test]
fn test_file_storage_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");

    {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(&path));
        let mut store = AnnotationStore::load(storage.clone());
        store.add_with(5, 12.0, 34.0, "saved", "green");
        storage.set("catalog_notes", "hello").unwrap();
    }

    let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(&path));
    let store = AnnotationStore::load(storage.clone());
    assert_eq!(store.find(5, "sticky-0").unwrap().text, "saved");
    assert_eq!(storage.get("catalog_notes").unwrap().as_deref(), Some("hello"));

    storage.remove("catalog_notes").unwrap();
    let reopened = FileStorage::open(&path);
    assert_eq!(reopened.get("catalog_notes").unwrap(), None);
}

#[test]
fn test_file_storage_ignores_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "garbage").unwrap();

    let storage = FileStorage::open(&path);
    assert_eq!(storage.get("anything").unwrap(), None);
    storage.set("key", "value").unwrap();
    assert_eq!(FileStorage::open(&path).get("key").unwrap().as_deref(), Some("value"));
}
