//! Spatial interaction core for a diagram editor.
//!
//! Turns pointer and keyboard input into diagram-space operations:
//! cursor-anchored zoom, pan-mode switching and grid-snapped drop targeting.
//! Rendering, persistence and UI widgets live in the host.
//!
//! ## Modules
//!
//! - `geometry` - Points, rects, grid snapping
//! - `viewport` - Screen <-> logical transform, zoom and pan
//! - `drop_zones` - Drop-zone registry and hit testing
//! - `mode` - Select/pan state machine with temporary pan
//! - `feedback` - Self-clearing insertion feedback
//! - `input` - Editing session that routes host events
//! - `settings` - JSON-backed configuration
//! - `logging` - Tracing subscriber setup

pub mod constants;
pub mod drop_zones;
pub mod error;
pub mod feedback;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod mode;
pub mod settings;
pub mod viewport;

pub use drop_zones::{DropZone, DropZoneOptions, DropZoneRegistry, HitResult};
pub use error::{CanvasError, CanvasResult};
pub use geometry::{Point, Rect, distance, point_in_rect, snap_to_grid};
pub use input::EditingSession;
pub use mode::{InteractionMode, ModeChange, ModeController};
pub use settings::InteractionSettings;
pub use viewport::{Viewport, ViewportState, ZoomLimits};
