//! Spatial Index Module
//!
//! R-tree over drop-zone bounds. Entries are keyed by the zone's registration
//! sequence number so the registry can pick the earliest-registered candidate
//! and keep linear-scan semantics while skipping most zones.

use crate::geometry::Rect;
use rstar::{AABB, RTree, RTreeObject};
use std::collections::{BTreeSet, HashMap};

/// A zone's bounding box in logical coordinates.
#[derive(Debug, Clone, Copy)]
pub struct ZoneEntry {
    pub seq: u64,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl ZoneEntry {
    pub fn new(seq: u64, bounds: Rect) -> Self {
        Self {
            seq,
            min_x: bounds.x,
            min_y: bounds.y,
            max_x: bounds.right(),
            max_y: bounds.bottom(),
        }
    }

    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl RTreeObject for ZoneEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

impl PartialEq for ZoneEntry {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

/// Point-query index over zone bounds.
///
/// Degenerate rects can never be hit and are left out. Rects whose far edge
/// overflows to infinity (or that carry a non-finite corner) would break the
/// tree's envelopes, so they sit in a side set and are always returned as
/// candidates for the caller to test exactly.
pub struct ZoneIndex {
    tree: RTree<ZoneEntry>,
    entries: HashMap<u64, ZoneEntry>,
    unbounded: BTreeSet<u64>,
}

impl ZoneIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
            unbounded: BTreeSet::new(),
        }
    }

    /// Insert or move the entry for `seq`.
    pub fn upsert(&mut self, seq: u64, bounds: Rect) {
        self.remove(seq);
        if bounds.is_degenerate() {
            return;
        }
        let entry = ZoneEntry::new(seq, bounds);
        let finite = [entry.min_x, entry.min_y, entry.max_x, entry.max_y]
            .iter()
            .all(|v| v.is_finite());
        if finite {
            self.tree.insert(entry);
            self.entries.insert(seq, entry);
        } else {
            self.unbounded.insert(seq);
        }
    }

    pub fn remove(&mut self, seq: u64) -> bool {
        if let Some(entry) = self.entries.remove(&seq) {
            self.tree.remove(&entry);
            true
        } else {
            self.unbounded.remove(&seq)
        }
    }

    /// Sequence numbers of zones that may contain the point, unordered.
    ///
    /// Tree entries are filtered exactly; unbounded entries are always included.
    pub fn query_point(&self, x: f64, y: f64) -> Vec<u64> {
        let point_envelope = AABB::from_point([x, y]);

        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.contains_point(x, y))
            .map(|entry| entry.seq)
            .chain(self.unbounded.iter().copied())
            .collect()
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
        self.unbounded.clear();
    }
}

impl Default for ZoneIndex {
    fn default() -> Self {
        Self::new()
    }
}
