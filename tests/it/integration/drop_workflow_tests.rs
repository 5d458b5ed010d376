//! Drop workflow: drag over zones, drop, feedback.

use crate::helpers::TestSessionBuilder;
use diagram_canvas::feedback::FeedbackKind;
use diagram_canvas::{DropZoneOptions, Point, Rect};
use std::time::{Duration, Instant};

fn session_with_zone_a() -> diagram_canvas::EditingSession {
    TestSessionBuilder::new()
        .with_zone(
            "A",
            Rect::new(100.0, 100.0, 200.0, 100.0),
            DropZoneOptions::snapped(10.0),
        )
        .build()
}

#[test]
fn test_drop_on_zoomed_canvas_resolves_logical_zone() {
    let mut session = session_with_zone_a();
    session.viewport_mut().zoom_at(Point::new(0.0, 0.0), 2.0);

    // Logical (123, 157) sits at screen (246, 314) at scale 2
    let hit = session.drop_at(Point::new(246.0, 314.0), Instant::now()).unwrap();
    assert_eq!(hit.zone_id, "A");
    assert_eq!(hit.local_position, Point::new(20.0, 60.0));
}

#[test]
fn test_drop_shows_feedback_that_expires() {
    let mut session = session_with_zone_a();
    let t0 = Instant::now();
    let duration = session.feedback().duration();

    session.drop_at(Point::new(150.0, 150.0), t0);
    let feedback = session.feedback().current().unwrap();
    assert_eq!(feedback.kind, FeedbackKind::Success);
    assert_eq!(feedback.zone_id.as_deref(), Some("A"));

    assert!(!session.tick(t0 + duration - Duration::from_millis(1)));
    assert!(session.tick(t0 + duration));
    assert!(session.feedback().current().is_none());
}

#[test]
fn test_missed_drop_shows_error() {
    let mut session = session_with_zone_a();
    let result = session.drop_at(Point::new(5.0, 5.0), Instant::now());
    assert!(result.is_none());
    assert_eq!(session.feedback().current().unwrap().kind, FeedbackKind::Error);
}

#[test]
fn test_second_drop_keeps_its_feedback_past_first_deadline() {
    let mut session = session_with_zone_a();
    let t0 = Instant::now();
    let duration = session.feedback().duration();

    session.drop_at(Point::new(5.0, 5.0), t0);
    session.drop_at(Point::new(150.0, 150.0), t0 + duration / 2);

    assert!(!session.tick(t0 + duration));
    assert_eq!(session.feedback().current().unwrap().kind, FeedbackKind::Success);
}

#[test]
fn test_drag_enter_leave_and_drop_reset_active() {
    let mut session = session_with_zone_a();
    assert!(session.drag_enter("A"));
    assert_eq!(session.zones().active(), Some("A"));

    // Hit testing while dragging leaves the active zone alone
    assert!(session.hit_test_screen(Point::new(0.0, 0.0)).is_none());
    assert_eq!(session.zones().active(), Some("A"));

    session.drag_leave();
    assert_eq!(session.zones().active(), None);

    session.drag_enter("A");
    session.drop_at(Point::new(150.0, 150.0), Instant::now());
    assert_eq!(session.zones().active(), None);
}

#[test]
fn test_layout_change_updates_hit_area() {
    let mut session = session_with_zone_a();
    assert!(session.layout_changed("A", Rect::new(500.0, 500.0, 50.0, 50.0)));
    assert!(session.hit_test_screen(Point::new(150.0, 150.0)).is_none());
    assert_eq!(
        session.hit_test_screen(Point::new(510.0, 510.0)).unwrap().zone_id,
        "A"
    );

    // Layout callback racing an unregister is harmless
    session.zones_mut().unregister("A");
    assert!(!session.layout_changed("A", Rect::new(0.0, 0.0, 10.0, 10.0)));
}

#[test]
fn test_register_zone_uses_session_defaults() {
    let mut session = TestSessionBuilder::new().build();
    session.register_zone("plain", Rect::new(0.0, 0.0, 100.0, 100.0));
    let zone = session.zones().get("plain").unwrap();
    assert!(!zone.grid_snap);
    assert_eq!(zone.grid_size, session.settings().default_grid_size);
}
