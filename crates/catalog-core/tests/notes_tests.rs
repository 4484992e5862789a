use catalog_core::constants::NOTES_STORAGE_KEY;
use catalog_core::*;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[test]
fn test_notes_saved_after_delay() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let mut pad = NotesPad::load(storage.clone(), Duration::from_millis(500));
    let start = Instant::now();

    pad.set_text("draft", start);
    assert!(pad.is_dirty());
    assert!(!pad.flush_if_due(start + Duration::from_millis(200)));
    assert_eq!(storage.get(NOTES_STORAGE_KEY).unwrap(), None);

    pad.set_text("draft two", start + Duration::from_millis(300));
    assert!(!pad.flush_if_due(start + Duration::from_millis(600)));
    assert!(pad.flush_if_due(start + Duration::from_millis(800)));
    assert_eq!(
        storage.get(NOTES_STORAGE_KEY).unwrap().as_deref(),
        Some("draft two")
    );
    assert!(!pad.is_dirty());
}

#[test]
fn test_notes_loaded_from_storage() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    storage.set(NOTES_STORAGE_KEY, "remember the blue chair").unwrap();

    let pad = NotesPad::load(storage, Duration::from_millis(500));
    assert_eq!(pad.text(), "remember the blue chair");
    assert!(!pad.is_dirty());
}

#[test]
fn test_flush_writes_immediately() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let mut pad = NotesPad::load(storage.clone(), Duration::from_secs(60));
    pad.set_text("now", Instant::now());
    pad.flush();
    assert_eq!(storage.get(NOTES_STORAGE_KEY).unwrap().as_deref(), Some("now"));
}
