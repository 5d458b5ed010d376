//! Viewport transform - zoom, pan and screen/logical coordinate conversion.
//!
//! Screen coordinates are host pixels; logical coordinates are diagram space.
//! The mapping is `screen = logical * scale + pan`.
//!
//! ## Cursor-anchored zoom
//!
//! [`Viewport::zoom_at`] rescales and then recomputes pan so that the logical
//! point under the cursor lands back on the same screen pixel:
//!
//! ```text
//! new_pan = cursor - logical_under_cursor * new_scale
//! ```
//!
//! Every mutation validates its input first. A rejected request leaves the
//! viewport untouched and logs a warning.

use crate::constants::DEFAULT_SCALE;
use crate::error::{CanvasError, CanvasResult};
use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// Optional clamp range for the viewport scale.
///
/// Only constructible through [`ZoomLimits::new`] (or deserialization, which
/// runs the same checks), so a held value always clamps to a positive scale.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawZoomLimits")]
pub struct ZoomLimits {
    min: Option<f64>,
    max: Option<f64>,
}

#[derive(Deserialize)]
struct RawZoomLimits {
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
}

impl TryFrom<RawZoomLimits> for ZoomLimits {
    type Error = CanvasError;

    fn try_from(raw: RawZoomLimits) -> CanvasResult<Self> {
        ZoomLimits::new(raw.min, raw.max)
    }
}

impl ZoomLimits {
    /// No clamping in either direction
    pub const UNBOUNDED: ZoomLimits = ZoomLimits { min: None, max: None };

    /// Build limits, rejecting non-positive, non-finite or inverted bounds.
    pub fn new(min: Option<f64>, max: Option<f64>) -> CanvasResult<Self> {
        let bad = |v: Option<f64>| v.is_some_and(|v| !(v.is_finite() && v > 0.0));
        let inverted = matches!((min, max), (Some(lo), Some(hi)) if lo > hi);
        if bad(min) || bad(max) || inverted {
            return Err(CanvasError::InvalidZoomLimits { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// Clamp a scale into range. Unset bounds do not clamp.
    pub fn clamp(&self, scale: f64) -> f64 {
        let mut s = scale;
        if let Some(min) = self.min {
            s = s.max(min);
        }
        if let Some(max) = self.max {
            s = s.min(max);
        }
        s
    }
}

/// Clamp `scale` and check the result is usable as a viewport scale.
fn clamped_scale(limits: &ZoomLimits, scale: f64) -> CanvasResult<f64> {
    let clamped = limits.clamp(scale);
    if clamped.is_finite() && clamped > 0.0 {
        Ok(clamped)
    } else {
        Err(CanvasError::NonFiniteScale(clamped))
    }
}

/// Serializable snapshot of the viewport, reported to the host on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub scale: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

/// Owns the current scale and pan offset for one diagram session.
#[derive(Debug, Clone)]
pub struct Viewport {
    scale: f64,
    pan: Point,
    limits: ZoomLimits,
    /// Host viewport size in screen pixels, used for center zoom
    size: (f64, f64),
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            pan: Point::default(),
            limits: ZoomLimits::UNBOUNDED,
            size: (0.0, 0.0),
        }
    }

    pub fn with_limits(mut self, limits: ZoomLimits) -> Self {
        self.set_limits(limits);
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.set_viewport_size(width, height);
        self
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn pan_offset(&self) -> Point {
        self.pan
    }

    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Replace the zoom limits, pulling the current scale into range.
    pub fn set_limits(&mut self, limits: ZoomLimits) {
        match clamped_scale(&limits, self.scale) {
            Ok(scale) => {
                self.limits = limits;
                self.scale = scale;
            }
            Err(e) => warn!("Rejected zoom limits: {}", e),
        }
    }

    pub fn size(&self) -> (f64, f64) {
        self.size
    }

    /// Update the host viewport size. Non-finite or negative sizes are ignored.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        if !(width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0) {
            warn!(width, height, "Ignoring invalid viewport size");
            return;
        }
        self.size = (width, height);
    }

    pub fn state(&self) -> ViewportState {
        ViewportState {
            scale: self.scale,
            pan_x: self.pan.x,
            pan_y: self.pan.y,
        }
    }

    /// Restore a snapshot. The scale is clamped to the current limits.
    pub fn restore(&mut self, state: ViewportState) -> CanvasResult<()> {
        if !(state.pan_x.is_finite() && state.pan_y.is_finite()) {
            return Err(CanvasError::NonFiniteCoordinate {
                x: state.pan_x,
                y: state.pan_y,
            });
        }
        self.try_set_scale(state.scale)?;
        self.pan = Point::new(state.pan_x, state.pan_y);
        Ok(())
    }

    /// Back to scale 1 (clamped) with no pan.
    pub fn reset(&mut self) {
        self.scale = clamped_scale(&self.limits, DEFAULT_SCALE).unwrap_or(DEFAULT_SCALE);
        self.pan = Point::default();
    }

    // ------------------------------------------------------------------------
    // Coordinate conversion
    // ------------------------------------------------------------------------

    #[inline]
    pub fn screen_to_logical(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan.x) / self.scale,
            (screen.y - self.pan.y) / self.scale,
        )
    }

    #[inline]
    pub fn logical_to_screen(&self, logical: Point) -> Point {
        Point::new(
            logical.x * self.scale + self.pan.x,
            logical.y * self.scale + self.pan.y,
        )
    }

    /// Convert a screen-space delta (e.g. a drag) to logical units.
    #[inline]
    pub fn screen_delta_to_logical(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.scale, dy / self.scale)
    }

    #[inline]
    pub fn logical_delta_to_screen(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx * self.scale, dy * self.scale)
    }

    /// The logical-space rectangle currently visible in the host viewport.
    pub fn visible_logical_rect(&self) -> Rect {
        let origin = self.screen_to_logical(Point::new(0.0, 0.0));
        Rect::new(
            origin.x,
            origin.y,
            self.size.0 / self.scale,
            self.size.1 / self.scale,
        )
    }

    // ------------------------------------------------------------------------
    // Zoom & pan
    // ------------------------------------------------------------------------

    /// Zoom by `factor`, keeping the logical point under `cursor` fixed on screen.
    pub fn try_zoom_at(&mut self, cursor: Point, factor: f64) -> CanvasResult<()> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(CanvasError::InvalidScaleFactor(factor));
        }
        if !cursor.is_finite() {
            return Err(CanvasError::NonFiniteCoordinate {
                x: cursor.x,
                y: cursor.y,
            });
        }
        let new_scale = clamped_scale(&self.limits, self.scale * factor)?;

        let anchor = self.screen_to_logical(cursor);
        let new_pan = Point::new(
            cursor.x - anchor.x * new_scale,
            cursor.y - anchor.y * new_scale,
        );
        if !new_pan.is_finite() {
            return Err(CanvasError::NonFiniteCoordinate {
                x: new_pan.x,
                y: new_pan.y,
            });
        }

        self.scale = new_scale;
        self.pan = new_pan;
        trace!(scale = self.scale, pan_x = self.pan.x, pan_y = self.pan.y, "Zoomed");
        Ok(())
    }

    /// Zoom around the cursor. Returns false (and logs) when the request is rejected.
    pub fn zoom_at(&mut self, cursor: Point, factor: f64) -> bool {
        match self.try_zoom_at(cursor, factor) {
            Ok(()) => true,
            Err(e) => {
                warn!("Rejected zoom: {}", e);
                false
            }
        }
    }

    /// Zoom around the center of the host viewport.
    pub fn try_zoom_at_center(&mut self, factor: f64) -> CanvasResult<()> {
        let center = Point::new(self.size.0 / 2.0, self.size.1 / 2.0);
        self.try_zoom_at(center, factor)
    }

    pub fn zoom_at_center(&mut self, factor: f64) -> bool {
        match self.try_zoom_at_center(factor) {
            Ok(()) => true,
            Err(e) => {
                warn!("Rejected center zoom: {}", e);
                false
            }
        }
    }

    /// Set the scale directly (clamped), keeping pan as is.
    pub fn try_set_scale(&mut self, scale: f64) -> CanvasResult<()> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(CanvasError::NonFiniteScale(scale));
        }
        self.scale = clamped_scale(&self.limits, scale)?;
        Ok(())
    }

    pub fn set_scale(&mut self, scale: f64) -> bool {
        match self.try_set_scale(scale) {
            Ok(()) => true,
            Err(e) => {
                warn!("Rejected scale: {}", e);
                false
            }
        }
    }

    /// Shift the pan offset by a screen-space delta. No world-bounds clamping.
    pub fn pan(&mut self, dx: f64, dy: f64) -> bool {
        let next = Point::new(self.pan.x + dx, self.pan.y + dy);
        if !next.is_finite() {
            warn!(dx, dy, "Rejected non-finite pan");
            return false;
        }
        self.pan = next;
        true
    }
}
