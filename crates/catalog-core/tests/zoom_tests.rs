use catalog_core::*;

#[test]
fn test_zoom_steps_and_limits() {
    let mut zoom = ZoomState::default();
    assert_eq!(zoom.level(), 1.0);
    assert!(!zoom.can_zoom_out());

    zoom.zoom_in();
    assert_eq!(zoom.level(), 1.25);
    assert_eq!(zoom.percent_label(), "125%");

    for _ in 0..20 {
        zoom.zoom_in();
    }
    assert_eq!(zoom.level(), 3.0);
    assert!(!zoom.can_zoom_in());

    zoom.zoom_out();
    assert_eq!(zoom.level(), 2.75);
}

#[test]
fn test_pan_only_when_zoomed() {
    let mut zoom = ZoomState::default();
    zoom.pan_by(10.0, 10.0);
    assert_eq!(zoom.pan(), (0.0, 0.0));

    zoom.set_level(2.0);
    zoom.pan_by(10.0, -5.0);
    assert_eq!(zoom.pan(), (10.0, -5.0));

    zoom.set_level(1.0);
    assert_eq!(zoom.pan(), (0.0, 0.0));
}

#[test]
fn test_reset_recenters() {
    let mut zoom = ZoomState::default();
    zoom.set_level(2.5);
    zoom.pan_by(40.0, 40.0);
    zoom.reset();
    assert_eq!(zoom.level(), 1.0);
    assert_eq!(zoom.pan(), (0.0, 0.0));
    assert!(!zoom.is_zoomed());
}
