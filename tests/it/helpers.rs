//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestRegistryBuilder` - Builder for registries with zones
//! - `TestSessionBuilder` - Builder for editing sessions
//! - Float assertions with a shared tolerance

#![allow(dead_code)]

use diagram_canvas::{
    DropZoneOptions, DropZoneRegistry, EditingSession, InteractionSettings, Point, Rect,
};

pub const TOLERANCE: f64 = 1e-9;

// ============================================================================
// TestRegistryBuilder
// ============================================================================

/// Builder for registries populated with zones.
///
/// # Example
/// ```ignore
/// let registry = TestRegistryBuilder::new()
///     .with_zone("A", (100.0, 100.0, 200.0, 100.0))
///     .with_snapped_zone("B", (0.0, 0.0, 50.0, 50.0), 10.0)
///     .build();
/// ```
#[derive(Default)]
pub struct TestRegistryBuilder {
    zones: Vec<(String, Rect, DropZoneOptions)>,
    index_threshold: Option<usize>,
}

impl TestRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(mut self, id: &str, (x, y, w, h): (f64, f64, f64, f64)) -> Self {
        self.zones
            .push((id.to_string(), Rect::new(x, y, w, h), DropZoneOptions::default()));
        self
    }

    pub fn with_snapped_zone(
        mut self,
        id: &str,
        (x, y, w, h): (f64, f64, f64, f64),
        grid_size: f64,
    ) -> Self {
        self.zones.push((
            id.to_string(),
            Rect::new(x, y, w, h),
            DropZoneOptions::snapped(grid_size),
        ));
        self
    }

    /// Force the R-tree path (`0`) or the linear scan (`usize::MAX`).
    pub fn with_index_threshold(mut self, threshold: usize) -> Self {
        self.index_threshold = Some(threshold);
        self
    }

    pub fn build(self) -> DropZoneRegistry {
        let mut registry = DropZoneRegistry::new();
        if let Some(threshold) = self.index_threshold {
            registry = registry.with_index_threshold(threshold);
        }
        for (id, bounds, options) in self.zones {
            registry.register(id, bounds, options);
        }
        registry
    }
}

// ============================================================================
// TestSessionBuilder
// ============================================================================

pub struct TestSessionBuilder {
    settings: InteractionSettings,
    size: (f64, f64),
    zones: Vec<(String, Rect, DropZoneOptions)>,
}

impl Default for TestSessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSessionBuilder {
    pub fn new() -> Self {
        Self {
            settings: InteractionSettings::default(),
            size: (800.0, 600.0),
            zones: Vec::new(),
        }
    }

    pub fn with_zoom_limits(mut self, min: f64, max: f64) -> Self {
        self.settings.min_scale = Some(min);
        self.settings.max_scale = Some(max);
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = (width, height);
        self
    }

    pub fn with_zone(mut self, id: &str, bounds: Rect, options: DropZoneOptions) -> Self {
        self.zones.push((id.to_string(), bounds, options));
        self
    }

    pub fn build(self) -> EditingSession {
        let mut session = EditingSession::new(self.settings).expect("valid test settings");
        session.resize(self.size.0, self.size.1);
        for (id, bounds, options) in self.zones {
            session.zones_mut().register(id, bounds, options);
        }
        session
    }
}

// ============================================================================
// Assertions
// ============================================================================

pub fn assert_near(actual: f64, expected: f64) {
    let tol = TOLERANCE * actual.abs().max(expected.abs()).max(1.0);
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual}"
    );
}

pub fn assert_point_near(actual: Point, expected: Point) {
    assert_near(actual.x, expected.x);
    assert_near(actual.y, expected.y);
}
