//! Drop-zone registry and hit testing.
//!
//! A drop zone is a named rectangle in logical coordinates that can accept a
//! dropped element. The registry never computes bounds itself; the host hands
//! them in on registration and whenever layout changes.
//!
//! ## Modules
//!
//! - `registry` - `DropZoneRegistry`: zone lifecycle, hit testing, active zone
//! - `spatial_index` - R-tree used by hit testing once the zone count grows

mod registry;
mod spatial_index;

pub use registry::DropZoneRegistry;

use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Per-zone grid options supplied at registration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DropZoneOptions {
    /// Snap local hit positions to the zone grid
    pub grid_snap: bool,
    /// Grid spacing; `None` or a non-positive value falls back to the registry default
    pub grid_size: Option<f64>,
}

impl DropZoneOptions {
    pub fn snapped(grid_size: f64) -> Self {
        Self {
            grid_snap: true,
            grid_size: Some(grid_size),
        }
    }
}

/// A registered drop target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropZone {
    pub id: String,
    pub bounds: Rect,
    pub is_valid: bool,
    pub grid_snap: bool,
    /// Always > 0
    pub grid_size: f64,
    /// Registration order; kept across re-registration of the same id
    #[serde(skip)]
    pub(crate) seq: u64,
}

/// Result of a successful hit test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitResult {
    pub zone_id: String,
    /// Position relative to the zone origin, grid-snapped if the zone snaps
    pub local_position: Point,
}
