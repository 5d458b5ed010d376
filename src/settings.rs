//! Interaction settings.
//!
//! Plain serde struct with per-field defaults, so a partial JSON document
//! (or `{}`) is a valid configuration. Call [`InteractionSettings::validate`]
//! before handing values to the viewport or registry; `load` does this for you.

use crate::constants::{
    DEFAULT_GRID_SIZE, FEEDBACK_DURATION_MS, LINE_SCROLL_STEP, LINE_ZOOM_DIVISOR,
    SPATIAL_INDEX_THRESHOLD, WHEEL_ZOOM_DIVISOR,
};
use crate::error::{CanvasError, CanvasResult};
use crate::viewport::ZoomLimits;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Lower zoom clamp; unset means unbounded
    pub min_scale: Option<f64>,
    /// Upper zoom clamp; unset means unbounded
    pub max_scale: Option<f64>,
    /// Grid size for zones registered without one
    pub default_grid_size: f64,
    /// Grid snapping for zones registered through the session without options
    pub default_grid_snap: bool,
    /// Pixel wheel delta per unit of zoom
    pub wheel_zoom_divisor: f64,
    /// Line wheel delta per unit of zoom
    pub line_zoom_divisor: f64,
    /// Pixels panned per wheel line
    pub line_scroll_step: f64,
    pub feedback_duration_ms: u64,
    /// Zone count at which hit testing uses the R-tree
    pub spatial_index_threshold: usize,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            min_scale: None,
            max_scale: None,
            default_grid_size: DEFAULT_GRID_SIZE,
            default_grid_snap: false,
            wheel_zoom_divisor: WHEEL_ZOOM_DIVISOR,
            line_zoom_divisor: LINE_ZOOM_DIVISOR,
            line_scroll_step: LINE_SCROLL_STEP,
            feedback_duration_ms: FEEDBACK_DURATION_MS,
            spatial_index_threshold: SPATIAL_INDEX_THRESHOLD,
        }
    }
}

fn require_positive(field: &'static str, value: f64) -> CanvasResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CanvasError::InvalidSetting {
            field,
            reason: format!("{value} must be finite and > 0"),
        })
    }
}

impl InteractionSettings {
    pub fn validate(&self) -> CanvasResult<()> {
        self.zoom_limits()?;
        if !(self.default_grid_size.is_finite() && self.default_grid_size > 0.0) {
            return Err(CanvasError::InvalidGridSize(self.default_grid_size));
        }
        require_positive("wheel_zoom_divisor", self.wheel_zoom_divisor)?;
        require_positive("line_zoom_divisor", self.line_zoom_divisor)?;
        require_positive("line_scroll_step", self.line_scroll_step)?;
        Ok(())
    }

    pub fn zoom_limits(&self) -> CanvasResult<ZoomLimits> {
        ZoomLimits::new(self.min_scale, self.max_scale)
    }

    pub fn feedback_duration(&self) -> Duration {
        Duration::from_millis(self.feedback_duration_ms)
    }

    pub fn from_json_str(json: &str) -> CanvasResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json_string(&self) -> CanvasResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> CanvasResult<Self> {
        let contents = fs::read_to_string(path)?;
        let settings = Self::from_json_str(&contents)?;
        debug!(path = %path.display(), "Loaded interaction settings");
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> CanvasResult<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}
