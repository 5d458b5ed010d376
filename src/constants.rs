//! Crate-wide constants.
//!
//! Centralizes magic numbers for zoom, grid snapping and input handling to make
//! the codebase more maintainable and self-documenting.

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Default zoom level
pub const DEFAULT_SCALE: f64 = 1.0;

/// Zoom factors closer to 1.0 than this are ignored by wheel zoom
pub const MIN_ZOOM_DELTA: f64 = 0.001;

/// Lower bound on a single wheel zoom step, so a large scroll shrinks
/// instead of producing a non-positive factor
pub const MIN_WHEEL_ZOOM_FACTOR: f64 = 0.1;

/// Pixel wheel delta divisor when converting scroll to a zoom factor
pub const WHEEL_ZOOM_DIVISOR: f64 = 500.0;

/// Line wheel delta divisor when converting scroll to a zoom factor
pub const LINE_ZOOM_DIVISOR: f64 = 50.0;

/// Pixels scrolled per wheel line when panning
pub const LINE_SCROLL_STEP: f64 = 20.0;

// ============================================================================
// Drop Zones
// ============================================================================

/// Grid size used when a zone is registered without a valid one
pub const DEFAULT_GRID_SIZE: f64 = 10.0;

/// Zone count at which hit testing switches from a linear scan to the R-tree
pub const SPATIAL_INDEX_THRESHOLD: usize = 64;

// ============================================================================
// Feedback Timing
// ============================================================================

/// How long insertion success/error feedback stays visible, in milliseconds
pub const FEEDBACK_DURATION_MS: u64 = 1500;
