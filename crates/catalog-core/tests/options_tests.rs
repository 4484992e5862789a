use catalog_core::*;
use tempfile::TempDir;

#[test]
fn test_default_options_are_valid() {
    let options = CatalogOptions::default();
    assert!(options.validate().is_ok());
    assert_eq!(options.book.total_positions(), 8);
    assert_eq!(options.double_tap_interval().as_millis(), 300);
    assert_eq!(options.resize_debounce().as_millis(), 150);
}

#[test]
fn test_validation_rejects_bad_values() {
    let mut options = CatalogOptions::default();
    options.book.content_pages = 0;
    assert!(matches!(options.validate(), Err(CatalogError::Config(_))));

    let mut options = CatalogOptions::default();
    options.layout.page_height = 0.0;
    assert!(matches!(options.validate(), Err(CatalogError::Config(_))));

    let mut options = CatalogOptions::default();
    options.zoom.min = 4.0;
    assert!(matches!(options.validate(), Err(CatalogError::Config(_))));

    let mut options = CatalogOptions::default();
    options.image_format.clear();
    assert!(matches!(options.validate(), Err(CatalogError::Config(_))));
}

#[test]
fn test_engine_config() {
    let options = CatalogOptions::default();
    let config = options.engine_config(640.0, 400.0, DisplayMode::Single);
    assert_eq!(config.page_count, 8);
    assert_eq!(config.duration_ms, 800);
    assert_eq!(config.display_mode, DisplayMode::Single);
    assert_eq!((config.width, config.height), (640.0, 400.0));
}

#[tokio::test]
async fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");

    let mut options = CatalogOptions::default();
    options.book = BookConfig::new(2, 12, 2);
    options.image_format = "png".to_string();
    options.preload_range = 3;

    options.save(&path).await.unwrap();
    let loaded = CatalogOptions::load(&path).await.unwrap();
    assert_eq!(loaded, options);
}

#[tokio::test]
async fn test_partial_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    tokio::fs::write(&path, r#"{"image_format": "webp", "preload_range": 1}"#)
        .await
        .unwrap();

    let loaded = CatalogOptions::load(&path).await.unwrap();
    assert_eq!(loaded.image_format, "webp");
    assert_eq!(loaded.preload_range, 1);
    assert_eq!(loaded.book, BookConfig::default());
    assert_eq!(loaded.flip_duration_ms, 800);
}

#[tokio::test]
async fn test_invalid_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    tokio::fs::write(&path, "{ nope").await.unwrap();

    match CatalogOptions::load(&path).await {
        Err(CatalogError::Config(msg)) => assert!(msg.contains("Failed to parse config")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}
