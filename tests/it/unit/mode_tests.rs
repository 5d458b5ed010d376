//! Unit tests for the mode controller.

use diagram_canvas::mode::ModifierEdge;
use diagram_canvas::{InteractionMode, ModeChange, ModeController};
use std::cell::RefCell;
use std::rc::Rc;

fn record(controller: &mut ModeController) -> Rc<RefCell<Vec<ModeChange>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    controller.subscribe(move |change| {
        sink.borrow_mut().push(*change);
        Ok(())
    });
    log
}

fn change(mode: InteractionMode, previous_mode: InteractionMode) -> ModeChange {
    ModeChange {
        mode,
        previous_mode,
    }
}

#[test]
fn test_temporary_pan_sequence() {
    let mut controller = ModeController::new();
    let log = record(&mut controller);

    controller.activate_temporary();
    assert_eq!(controller.effective_mode(), InteractionMode::Pan);
    assert_eq!(controller.mode(), InteractionMode::Select);
    assert_eq!(controller.previous_mode(), Some(InteractionMode::Select));

    controller.restore_previous();
    assert_eq!(controller.effective_mode(), InteractionMode::Select);

    // Second restore is a no-op
    assert!(!controller.restore_previous());
    assert_eq!(
        *log.borrow(),
        vec![
            change(InteractionMode::Pan, InteractionMode::Select),
            change(InteractionMode::Select, InteractionMode::Pan),
        ]
    );
}

#[test]
fn test_set_pan_while_temporary_clears_flag() {
    let mut controller = ModeController::new();
    let log = record(&mut controller);

    controller.activate_temporary();
    controller.set_mode(InteractionMode::Pan);
    assert!(!controller.is_temporary());
    assert!(controller.is_pan());

    controller.set_mode(InteractionMode::Select);
    assert!(controller.is_select());
    assert_eq!(
        *log.borrow(),
        vec![
            change(InteractionMode::Pan, InteractionMode::Select),
            change(InteractionMode::Pan, InteractionMode::Select),
            change(InteractionMode::Select, InteractionMode::Pan),
        ]
    );
}

#[test]
fn test_temporary_from_pan_mode() {
    let mut controller = ModeController::new();
    controller.set_mode(InteractionMode::Pan);
    let log = record(&mut controller);

    assert!(controller.activate_temporary());
    assert!(controller.restore_previous());
    assert_eq!(controller.mode(), InteractionMode::Pan);
    assert!(controller.is_pan());
    assert_eq!(
        *log.borrow(),
        vec![
            change(InteractionMode::Pan, InteractionMode::Pan),
            change(InteractionMode::Pan, InteractionMode::Pan),
        ]
    );
}

#[test]
fn test_listeners_run_in_subscription_order() {
    let mut controller = ModeController::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    for tag in ["first", "second", "third"] {
        let sink = Rc::clone(&order);
        controller.subscribe(move |_| {
            sink.borrow_mut().push(tag);
            Ok(())
        });
    }
    controller.toggle_mode();
    assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
}

#[test]
fn test_listener_fault_does_not_roll_back() {
    let mut controller = ModeController::new();
    let before = record(&mut controller);
    controller.subscribe(|_| anyhow::bail!("listener rejected change"));
    let after = record(&mut controller);

    assert!(controller.toggle_mode());
    assert_eq!(controller.mode(), InteractionMode::Pan);
    assert_eq!(before.borrow().len(), 1);
    assert_eq!(after.borrow().len(), 1);
}

#[test]
fn test_modifier_edge_drives_temporary_pan() {
    let mut controller = ModeController::new();
    let mut edge = ModifierEdge::new();
    for _ in 0..3 {
        edge.update(true, &mut controller);
    }
    assert!(edge.is_pressed());
    assert!(controller.is_pan());

    edge.update(false, &mut controller);
    assert!(controller.is_select());
}

#[test]
fn test_release_after_explicit_mode_change_is_silent() {
    let mut controller = ModeController::new();
    let mut edge = ModifierEdge::new();
    let log = record(&mut controller);

    assert!(edge.update(true, &mut controller));
    assert!(controller.is_temporary());
    controller.set_mode(InteractionMode::Pan);
    assert!(!controller.is_temporary());

    // Still an edge for the key, but nothing left to restore
    assert!(edge.update(false, &mut controller));
    assert!(controller.is_pan());
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn test_reselecting_base_mode_drops_temporary_pan() {
    let mut controller = ModeController::new();
    controller.set_mode(InteractionMode::Pan);
    let log = record(&mut controller);

    controller.activate_temporary();
    assert!(!controller.set_mode(InteractionMode::Pan));
    assert!(!controller.is_temporary());
    assert!(!controller.restore_previous());
    assert_eq!(
        *log.borrow(),
        vec![change(InteractionMode::Pan, InteractionMode::Pan)]
    );
}

#[test]
fn test_mode_serializes_lowercase() {
    let json = serde_json::to_string(&change(InteractionMode::Pan, InteractionMode::Select)).unwrap();
    assert_eq!(json, r#"{"mode":"pan","previous_mode":"select"}"#);
}
