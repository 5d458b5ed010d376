//! Error types for canvas interaction
//!
//! Geometry and lookup misses are `Option::None`, not errors. The variants here
//! describe caller contract violations (rejected as no-ops) and settings I/O.

use thiserror::Error;

/// Errors that can occur while configuring or mutating interaction state
#[derive(Error, Debug)]
pub enum CanvasError {
    /// Zoom factor was zero, negative or not finite
    #[error("Invalid zoom factor: {0} (must be finite and > 0)")]
    InvalidScaleFactor(f64),

    /// A zoom would have produced a scale that is not finite and positive
    #[error("Non-finite scale: {0}")]
    NonFiniteScale(f64),

    /// A cursor position or pan delta contained NaN or infinity
    #[error("Non-finite coordinate: ({x}, {y})")]
    NonFiniteCoordinate { x: f64, y: f64 },

    /// Grid size was zero, negative or not finite
    #[error("Invalid grid size: {0} (must be finite and > 0)")]
    InvalidGridSize(f64),

    /// Zoom limits are non-positive or inverted
    #[error("Invalid zoom limits: min {min:?}, max {max:?}")]
    InvalidZoomLimits { min: Option<f64>, max: Option<f64> },

    /// A settings value failed validation
    #[error("Invalid setting `{field}`: {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error from serde_json
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for canvas operations
pub type CanvasResult<T> = Result<T, CanvasError>;
