//! Pointer state machine for the editing session.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Panning     (middle button down, or primary down while panning is effective)
//! Idle -> Pressing    (primary down in select mode; the host owns what the drag means)
//!
//! Any -> Idle         (pointer up)
//! ```

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointerState {
    /// No button held
    #[default]
    Idle,

    /// Dragging the canvas
    Panning {
        /// Last pointer position for delta calculation
        last_pos: Point,
    },

    /// Primary button held in select mode
    Pressing {
        /// Where the press started
        start: Point,
        /// Current pointer position
        current: Point,
    },
}

impl PointerState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }

    pub fn is_pressing(&self) -> bool {
        matches!(self, Self::Pressing { .. })
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    pub fn start_panning(&mut self, pos: Point) {
        *self = Self::Panning { last_pos: pos };
    }

    pub fn start_pressing(&mut self, pos: Point) {
        *self = Self::Pressing {
            start: pos,
            current: pos,
        };
    }

    /// Advance the pan anchor, returning the screen delta since the last move.
    pub fn advance_pan(&mut self, pos: Point) -> Option<(f64, f64)> {
        match self {
            Self::Panning { last_pos } => {
                let delta = (pos.x - last_pos.x, pos.y - last_pos.y);
                *last_pos = pos;
                Some(delta)
            }
            _ => None,
        }
    }

    pub fn set_press_current(&mut self, pos: Point) {
        if let Self::Pressing { current, .. } = self {
            *current = pos;
        }
    }

    pub fn press_start(&self) -> Option<Point> {
        match self {
            Self::Pressing { start, .. } => Some(*start),
            _ => None,
        }
    }

    pub fn press_current(&self) -> Option<Point> {
        match self {
            Self::Pressing { current, .. } => Some(*current),
            _ => None,
        }
    }
}
