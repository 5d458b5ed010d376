//! Unit tests for transient insertion feedback.

use diagram_canvas::feedback::{FeedbackKind, FeedbackSlot};
use std::time::{Duration, Instant};

#[test]
fn test_default_duration() {
    let slot = FeedbackSlot::default();
    assert_eq!(slot.duration(), Duration::from_millis(1500));
    assert!(slot.current().is_none());
}

#[test]
fn test_show_schedules_clear() {
    let now = Instant::now();
    let mut slot = FeedbackSlot::new(Duration::from_millis(250));
    slot.show(FeedbackKind::Success, Some("A".to_string()), now);

    let feedback = slot.current().unwrap();
    assert_eq!(feedback.kind, FeedbackKind::Success);
    assert_eq!(feedback.zone_id.as_deref(), Some("A"));
    assert_eq!(slot.next_deadline(), Some(now + Duration::from_millis(250)));
}

#[test]
fn test_state_change_before_timer_suppresses_stale_clear() {
    let t0 = Instant::now();
    let mut slot = FeedbackSlot::new(Duration::from_millis(100));

    let stale = slot.show(FeedbackKind::Error, None, t0);
    slot.show(FeedbackKind::Success, Some("B".to_string()), t0 + Duration::from_millis(60));

    // The first timer fires at t0+100 but belongs to the superseded feedback
    assert!(!slot.expire(stale));
    assert!(!slot.tick(t0 + Duration::from_millis(100)));
    assert_eq!(slot.current().unwrap().kind, FeedbackKind::Success);

    assert!(slot.tick(t0 + Duration::from_millis(160)));
    assert!(slot.current().is_none());
}

#[test]
fn test_clear_drops_pending() {
    let t0 = Instant::now();
    let mut slot = FeedbackSlot::new(Duration::from_millis(100));
    let handle = slot.show(FeedbackKind::Success, None, t0);
    slot.clear();
    assert!(slot.current().is_none());
    assert!(!slot.expire(handle));
    assert_eq!(slot.next_deadline(), None);
}
