use catalog_core::*;

fn book() -> BookConfig {
    BookConfig::new(2, 4, 2)
}

fn label(positions: &[u32]) -> String {
    let window = ViewWindow::from_positions(positions).unwrap();
    classify_view(&book(), window).label.to_string()
}

#[test]
fn test_labels_for_default_book() {
    assert_eq!(label(&[1]), "Cover");
    assert_eq!(label(&[1, 2]), "Cover");
    assert_eq!(label(&[3, 4]), "1-2");
    assert_eq!(label(&[7, 8]), "Back cover");
    assert_eq!(label(&[3]), "1");
}

#[test]
fn test_spread_with_one_content_page() {
    assert_eq!(label(&[2, 3]), "1");
    assert_eq!(label(&[6, 7]), "4");
}

#[test]
fn test_view_kinds() {
    let config = book();
    let kind = |w: ViewWindow| classify_view(&config, w).kind;

    assert_eq!(kind(ViewWindow::Single(1)), ViewKind::FrontCover);
    assert_eq!(kind(ViewWindow::Spread(1, 2)), ViewKind::FrontCover);
    assert_eq!(kind(ViewWindow::Spread(4, 5)), ViewKind::Spread);
    assert_eq!(kind(ViewWindow::Spread(2, 3)), ViewKind::Spread);
    assert_eq!(kind(ViewWindow::Spread(7, 8)), ViewKind::BackCover);
    assert_eq!(kind(ViewWindow::Single(8)), ViewKind::BackCover);
}

#[test]
fn test_empty_slot_next_to_cover() {
    let config = book();
    assert_eq!(
        classify_view(&config, ViewWindow::Spread(0, 1)).kind,
        ViewKind::FrontCover
    );
    assert_eq!(
        classify_view(&config, ViewWindow::Spread(8, 0)).kind,
        ViewKind::BackCover
    );
    assert_eq!(label(&[0, 1]), "Cover");
}

#[test]
fn test_invalid_window_sizes() {
    assert!(ViewWindow::from_positions(&[]).is_none());
    assert!(ViewWindow::from_positions(&[1, 2, 3]).is_none());
}

#[test]
fn test_position_label_matches_single_window() {
    let config = book();
    for pos in 1..=config.total_positions() {
        assert_eq!(
            position_label(&config, pos),
            classify_view(&config, ViewWindow::Single(pos)).label
        );
    }
}
