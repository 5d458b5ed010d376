//! Drop-zone registry - one instance per editing session.
//!
//! Zones are kept in registration order. Hit testing returns the first
//! matching zone in that order, so overlapping zones resolve to whichever was
//! registered earliest. Re-registering an id replaces the zone in place
//! without moving it to the back.

use super::spatial_index::ZoneIndex;
use super::{DropZone, DropZoneOptions, HitResult};
use crate::constants::{DEFAULT_GRID_SIZE, SPATIAL_INDEX_THRESHOLD};
use crate::geometry::{Point, Rect, point_in_rect, snap_to_grid};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace, warn};

pub struct DropZoneRegistry {
    zones: HashMap<String, DropZone>,
    /// seq -> id, iterated for registration-order scans
    order: BTreeMap<u64, String>,
    next_seq: u64,
    active: Option<String>,
    index: ZoneIndex,
    default_grid_size: f64,
    index_threshold: usize,
}

impl Default for DropZoneRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DropZoneRegistry {
    pub fn new() -> Self {
        Self {
            zones: HashMap::new(),
            order: BTreeMap::new(),
            next_seq: 0,
            active: None,
            index: ZoneIndex::new(),
            default_grid_size: DEFAULT_GRID_SIZE,
            index_threshold: SPATIAL_INDEX_THRESHOLD,
        }
    }

    /// Override the fallback grid size. Invalid values keep the built-in default.
    pub fn with_default_grid_size(mut self, grid_size: f64) -> Self {
        if grid_size.is_finite() && grid_size > 0.0 {
            self.default_grid_size = grid_size;
        } else {
            warn!(grid_size, "Ignoring invalid default grid size");
        }
        self
    }

    /// Zone count at which hit testing goes through the R-tree.
    pub fn with_index_threshold(mut self, threshold: usize) -> Self {
        self.index_threshold = threshold;
        self
    }

    pub fn default_grid_size(&self) -> f64 {
        self.default_grid_size
    }

    fn resolve_grid_size(&self, id: &str, grid_size: Option<f64>) -> f64 {
        match grid_size {
            Some(g) if g.is_finite() && g > 0.0 => g,
            Some(g) => {
                warn!(zone = id, grid_size = g, "Invalid grid size, using default");
                self.default_grid_size
            }
            None => self.default_grid_size,
        }
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Insert a zone, or replace the one with the same id.
    pub fn register(&mut self, id: impl Into<String>, bounds: Rect, options: DropZoneOptions) {
        let id = id.into();
        let grid_size = self.resolve_grid_size(&id, options.grid_size);
        let seq = match self.zones.get(&id) {
            Some(existing) => existing.seq,
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                self.order.insert(seq, id.clone());
                seq
            }
        };
        if bounds.is_degenerate() {
            debug!(zone = %id, ?bounds, "Registered zone has empty bounds; it will not be hit");
        }
        self.index.upsert(seq, bounds);
        trace!(zone = %id, seq, "Registered drop zone");
        self.zones.insert(
            id.clone(),
            DropZone {
                id,
                bounds,
                is_valid: true,
                grid_snap: options.grid_snap,
                grid_size,
                seq,
            },
        );
    }

    /// Remove a zone. Clears the active zone if it was this one.
    pub fn unregister(&mut self, id: &str) -> bool {
        let Some(zone) = self.zones.remove(id) else {
            return false;
        };
        self.order.remove(&zone.seq);
        self.index.remove(zone.seq);
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
        trace!(zone = id, "Unregistered drop zone");
        true
    }

    /// Remove every zone and the active zone.
    pub fn clear(&mut self) {
        self.zones.clear();
        self.order.clear();
        self.index.clear();
        self.active = None;
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    /// Replace a zone's bounds after a layout change. Unknown ids are ignored.
    pub fn update_bounds(&mut self, id: &str, bounds: Rect) -> bool {
        let Some(zone) = self.zones.get_mut(id) else {
            trace!(zone = id, "Bounds update for unknown zone");
            return false;
        };
        zone.bounds = bounds;
        let seq = zone.seq;
        self.index.upsert(seq, bounds);
        true
    }

    pub fn set_valid(&mut self, id: &str, is_valid: bool) -> bool {
        match self.zones.get_mut(id) {
            Some(zone) => {
                zone.is_valid = is_valid;
                true
            }
            None => false,
        }
    }

    /// Change grid settings. An invalid `grid_size` falls back to the default.
    pub fn update_grid(&mut self, id: &str, grid_snap: bool, grid_size: Option<f64>) -> bool {
        if !self.zones.contains_key(id) {
            return false;
        }
        let resolved = self.resolve_grid_size(id, grid_size);
        if let Some(zone) = self.zones.get_mut(id) {
            zone.grid_snap = grid_snap;
            zone.grid_size = resolved;
        }
        true
    }

    /// Mark a zone as the drag target, or clear it with `None`.
    ///
    /// Returns false and leaves the active zone unchanged for an unknown id.
    pub fn set_active(&mut self, id: Option<&str>) -> bool {
        match id {
            None => {
                self.active = None;
                true
            }
            Some(id) if self.zones.contains_key(id) => {
                self.active = Some(id.to_string());
                true
            }
            Some(id) => {
                debug!(zone = id, "Cannot activate unknown zone");
                false
            }
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }

    pub fn get(&self, id: &str) -> Option<&DropZone> {
        self.zones.get(id)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// All zones in registration order.
    pub fn list_all(&self) -> Vec<&DropZone> {
        self.iter_ordered().collect()
    }

    fn iter_ordered(&self) -> impl Iterator<Item = &DropZone> + '_ {
        self.order.values().filter_map(|id| self.zones.get(id))
    }

    /// Zone bounds grown by `pad` on every edge (negative shrinks).
    pub fn bounds_with_padding(&self, id: &str, pad: f64) -> Option<Rect> {
        self.zones.get(id).map(|zone| zone.bounds.expand(pad))
    }

    pub fn to_zone_local(&self, x: f64, y: f64, id: &str) -> Option<Point> {
        let zone = self.zones.get(id)?;
        Some(Point::new(x - zone.bounds.x, y - zone.bounds.y))
    }

    pub fn to_global(&self, local_x: f64, local_y: f64, id: &str) -> Option<Point> {
        let zone = self.zones.get(id)?;
        Some(Point::new(local_x + zone.bounds.x, local_y + zone.bounds.y))
    }

    // ------------------------------------------------------------------------
    // Hit testing
    // ------------------------------------------------------------------------

    fn accepts(zone: &DropZone, point: Point) -> bool {
        zone.is_valid && point_in_rect(point, zone.bounds)
    }

    fn hit_result(zone: &DropZone, point: Point) -> HitResult {
        let mut local = Point::new(point.x - zone.bounds.x, point.y - zone.bounds.y);
        if zone.grid_snap {
            local = Point::new(
                snap_to_grid(local.x, zone.grid_size),
                snap_to_grid(local.y, zone.grid_size),
            );
        }
        HitResult {
            zone_id: zone.id.clone(),
            local_position: local,
        }
    }

    /// First valid zone (in registration order) containing the point.
    ///
    /// Never mutates the registry, including the active zone.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<HitResult> {
        let point = Point::new(x, y);
        let hit = if self.zones.len() >= self.index_threshold {
            self.index
                .query_point(x, y)
                .into_iter()
                .filter_map(|seq| self.order.get(&seq).and_then(|id| self.zones.get(id)))
                .filter(|zone| Self::accepts(zone, point))
                .min_by_key(|zone| zone.seq)
        } else {
            self.iter_ordered().find(|zone| Self::accepts(zone, point))
        };
        let result = hit.map(|zone| Self::hit_result(zone, point));
        trace!(x, y, zone = ?result.as_ref().map(|r| r.zone_id.as_str()), "Hit test");
        result
    }

    /// Every valid zone containing the point, in registration order.
    pub fn hit_test_all(&self, x: f64, y: f64) -> Vec<HitResult> {
        let point = Point::new(x, y);
        self.iter_ordered()
            .filter(|zone| Self::accepts(zone, point))
            .map(|zone| Self::hit_result(zone, point))
            .collect()
    }
}
