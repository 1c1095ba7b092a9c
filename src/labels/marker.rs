//! Marker lookup for shields and line patterns.
//!
//! The cache is an ordinary value constructed by the caller and passed by
//! reference to whatever needs it, so its lifetime is explicit.

use std::collections::HashMap;
use std::sync::Arc;

use glam::{DAffine2, DVec2};

use crate::error::{PlacementError, PlacementResult};
use crate::geo::Envelope;

/// Kind of marker image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// Decoded raster image; its size is fixed.
    Bitmap,
    /// Vector image; rendered at the symbolizer's scale.
    Vector,
}

/// A decoded marker image. Only its dimensions matter for placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Marker {
    pub fn bitmap(width: f64, height: f64) -> Self {
        Self {
            kind: MarkerKind::Bitmap,
            width,
            height,
        }
    }

    pub fn vector(width: f64, height: f64) -> Self {
        Self {
            kind: MarkerKind::Vector,
            width,
            height,
        }
    }

    pub fn is_bitmap(&self) -> bool {
        self.kind == MarkerKind::Bitmap
    }

    /// Centred marker rectangle after `transform`, as the bounding box of its
    /// four transformed corners.
    pub fn transformed_bounds(&self, transform: &DAffine2) -> Envelope {
        Envelope::centered(DVec2::ZERO, self.width, self.height).transformed(transform)
    }
}

/// Lookup of markers by file name.
pub trait MarkerCache {
    fn find(&self, file: &str) -> Option<Arc<Marker>>;
}

/// In-memory marker cache keyed by file name.
#[derive(Debug, Default, Clone)]
pub struct MarkerStore {
    markers: HashMap<String, Arc<Marker>>,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a marker under `file`, replacing any previous entry.
    pub fn insert(&mut self, file: &str, marker: Marker) -> Arc<Marker> {
        let marker = Arc::new(marker);
        self.markers.insert(file.to_string(), Arc::clone(&marker));
        marker
    }

    pub fn remove(&mut self, file: &str) -> bool {
        self.markers.remove(file).is_some()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl MarkerCache for MarkerStore {
    fn find(&self, file: &str) -> Option<Arc<Marker>> {
        self.markers.get(file).cloned()
    }
}

/// Look up `file` in `cache`, failing when the name is empty or unknown.
pub fn resolve_marker<C: MarkerCache + ?Sized>(cache: &C, file: &str) -> PlacementResult<Arc<Marker>> {
    if file.is_empty() {
        return Err(PlacementError::marker("no marker file given"));
    }
    cache
        .find(file)
        .ok_or_else(|| PlacementError::marker(format!("'{}' not found", file)))
}

/// A shield marker evaluated for one feature.
#[derive(Debug, Clone, PartialEq)]
pub struct ShieldMarker {
    pub marker: Arc<Marker>,
    /// Evaluated image transform.
    pub transform: DAffine2,
    /// Marker box around the anchor after the image transform.
    pub bounds: Envelope,
    /// Marker ignores the text displacement when set.
    pub unlock_image: bool,
    /// Marker displacement in pixels.
    pub displacement: DVec2,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_lookup() {
        let mut store = MarkerStore::new();
        store.insert("shield.png", Marker::bitmap(16.0, 12.0));
        let marker = store.find("shield.png").unwrap();
        assert_eq!(marker.width, 16.0);
        assert!(marker.is_bitmap());
        assert!(store.find("missing.png").is_none());
        assert!(store.remove("shield.png"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_resolve_reports_missing() {
        let store = MarkerStore::new();
        let err = resolve_marker(&store, "missing.png").unwrap_err();
        assert_eq!(err.category(), "Marker");
        assert!(err.to_string().contains("missing.png"));
        assert!(resolve_marker(&store, "").is_err());
    }

    #[test]
    fn test_transformed_bounds_scaled() {
        let marker = Marker::vector(10.0, 4.0);
        let bounds = marker.transformed_bounds(&DAffine2::from_scale(DVec2::splat(2.0)));
        assert_eq!(bounds, Envelope::from_coords(-10.0, -4.0, 10.0, 4.0));
    }
}
