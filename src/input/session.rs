//! Editing session - routes host input to the viewport, mode controller and
//! drop-zone registry.
//!
//! One session per open diagram. Events must be delivered in the order the
//! host received them; every call runs to completion before returning.

use super::events::{PointerButton, WheelDelta, WheelEvent};
use super::state::PointerState;
use crate::constants::{MIN_WHEEL_ZOOM_FACTOR, MIN_ZOOM_DELTA};
use crate::drop_zones::{DropZoneOptions, DropZoneRegistry, HitResult};
use crate::error::CanvasResult;
use crate::feedback::{FeedbackKind, FeedbackSlot};
use crate::geometry::{Point, Rect};
use crate::mode::{ModeController, ModifierEdge};
use crate::settings::InteractionSettings;
use crate::viewport::{Viewport, ViewportState};
use std::time::Instant;
use tracing::debug;

pub struct EditingSession {
    viewport: Viewport,
    zones: DropZoneRegistry,
    modes: ModeController,
    modifier: ModifierEdge,
    pointer: PointerState,
    feedback: FeedbackSlot,
    settings: InteractionSettings,
}

impl Default for EditingSession {
    fn default() -> Self {
        let settings = InteractionSettings::default();
        Self {
            viewport: Viewport::new(),
            zones: DropZoneRegistry::new(),
            modes: ModeController::new(),
            modifier: ModifierEdge::new(),
            pointer: PointerState::Idle,
            feedback: FeedbackSlot::new(settings.feedback_duration()),
            settings,
        }
    }
}

impl EditingSession {
    /// Build a session from validated settings.
    pub fn new(settings: InteractionSettings) -> CanvasResult<Self> {
        settings.validate()?;
        let limits = settings.zoom_limits()?;
        Ok(Self {
            viewport: Viewport::new().with_limits(limits),
            zones: DropZoneRegistry::new()
                .with_default_grid_size(settings.default_grid_size)
                .with_index_threshold(settings.spatial_index_threshold),
            modes: ModeController::new(),
            modifier: ModifierEdge::new(),
            pointer: PointerState::Idle,
            feedback: FeedbackSlot::new(settings.feedback_duration()),
            settings,
        })
    }

    pub fn settings(&self) -> &InteractionSettings {
        &self.settings
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn viewport_state(&self) -> ViewportState {
        self.viewport.state()
    }

    pub fn zones(&self) -> &DropZoneRegistry {
        &self.zones
    }

    pub fn zones_mut(&mut self) -> &mut DropZoneRegistry {
        &mut self.zones
    }

    pub fn modes(&self) -> &ModeController {
        &self.modes
    }

    pub fn modes_mut(&mut self) -> &mut ModeController {
        &mut self.modes
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn feedback(&self) -> &FeedbackSlot {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut FeedbackSlot {
        &mut self.feedback
    }

    /// Host canvas was resized.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.set_viewport_size(width, height);
    }

    // ------------------------------------------------------------------------
    // Pointer
    // ------------------------------------------------------------------------

    pub fn pointer_down(&mut self, pos: Point, button: PointerButton) {
        match button {
            PointerButton::Middle => self.pointer.start_panning(pos),
            PointerButton::Primary if self.modes.is_pan() => self.pointer.start_panning(pos),
            PointerButton::Primary => self.pointer.start_pressing(pos),
            PointerButton::Secondary => {}
        }
    }

    /// Returns true if the viewport moved.
    pub fn pointer_move(&mut self, pos: Point) -> bool {
        if let Some((dx, dy)) = self.pointer.advance_pan(pos) {
            return self.viewport.pan(dx, dy);
        }
        self.pointer.set_press_current(pos);
        false
    }

    pub fn pointer_up(&mut self, pos: Point) -> bool {
        let moved = self.pointer_move(pos);
        self.pointer.reset();
        moved
    }

    // ------------------------------------------------------------------------
    // Wheel & keys
    // ------------------------------------------------------------------------

    /// Zoom around the cursor with the zoom modifier held, otherwise pan.
    /// Returns true if the viewport changed.
    pub fn wheel(&mut self, event: WheelEvent) -> bool {
        if event.zoom_modifier {
            let factor = match event.delta {
                WheelDelta::Pixels { y, .. } => 1.0 - y / self.settings.wheel_zoom_divisor,
                WheelDelta::Lines { y, .. } => 1.0 - y / self.settings.line_zoom_divisor,
            };
            if !factor.is_finite() || (factor - 1.0).abs() <= MIN_ZOOM_DELTA {
                return false;
            }
            return self
                .viewport
                .zoom_at(event.position, factor.max(MIN_WHEEL_ZOOM_FACTOR));
        }

        match event.delta {
            WheelDelta::Pixels { x, y } => self.viewport.pan(x, y),
            WheelDelta::Lines { x, y } => {
                let step = self.settings.line_scroll_step;
                self.viewport.pan(x * step, y * step)
            }
        }
    }

    /// Feed the "temporary pan" modifier state. Returns true on an edge.
    pub fn modifier_changed(&mut self, pressed: bool) -> bool {
        self.modifier.update(pressed, &mut self.modes)
    }

    // ------------------------------------------------------------------------
    // Drop zones
    // ------------------------------------------------------------------------

    /// Register a zone with the session's default grid settings.
    pub fn register_zone(&mut self, id: impl Into<String>, bounds: Rect) {
        let options = DropZoneOptions {
            grid_snap: self.settings.default_grid_snap,
            grid_size: None,
        };
        self.zones.register(id, bounds, options);
    }

    /// A zone's element moved or resized.
    pub fn layout_changed(&mut self, id: &str, bounds: Rect) -> bool {
        self.zones.update_bounds(id, bounds)
    }

    pub fn drag_enter(&mut self, id: &str) -> bool {
        self.zones.set_active(Some(id))
    }

    pub fn drag_leave(&mut self) {
        self.zones.set_active(None);
    }

    /// Hit test a screen position against the zones (which live in logical space).
    pub fn hit_test_screen(&self, pos: Point) -> Option<HitResult> {
        let logical = self.viewport.screen_to_logical(pos);
        self.zones.hit_test(logical.x, logical.y)
    }

    /// Resolve a drop, show success or error feedback, and end the drag.
    pub fn drop_at(&mut self, pos: Point, now: Instant) -> Option<HitResult> {
        let hit = self.hit_test_screen(pos);
        match &hit {
            Some(result) => {
                debug!(zone = %result.zone_id, local = ?result.local_position, "Drop accepted");
                self.feedback
                    .show(FeedbackKind::Success, Some(result.zone_id.clone()), now);
            }
            None => {
                debug!(x = pos.x, y = pos.y, "Drop outside any zone");
                self.feedback.show(FeedbackKind::Error, None, now);
            }
        }
        self.zones.set_active(None);
        hit
    }

    /// Drive time-based state from the UI loop. Returns true if anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.feedback.tick(now)
    }
}
