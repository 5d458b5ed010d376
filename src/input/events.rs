//! Host input event types.
//!
//! The host UI translates its native events into these before calling the
//! session. Positions are screen pixels relative to the canvas origin.

use crate::geometry::Point;

/// Which pointer button went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// Wheel delta as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelDelta {
    /// Precise (trackpad) delta in pixels
    Pixels { x: f64, y: f64 },
    /// Notched wheel delta in lines
    Lines { x: f64, y: f64 },
}

/// A wheel event at a screen position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub position: Point,
    pub delta: WheelDelta,
    /// Command/Control held: zoom instead of pan
    pub zoom_modifier: bool,
}
