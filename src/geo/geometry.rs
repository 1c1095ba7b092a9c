//! Feature geometry model.
//!
//! A [`Feature`] owns an ordered list of [`Geometry`] paths in feature
//! (layer) coordinates. Placement code only ever borrows them.

use std::collections::HashMap;

use glam::DVec2;

use super::bbox::Envelope;

/// Shape kind of a single geometry path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    /// Point feature (city, peak, etc.).
    Point,
    /// Line feature (road, river, etc.).
    LineString,
    /// Polygon feature (lake, country, etc.), stored as its exterior ring.
    Polygon,
}

/// One vertex path tagged with its shape kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    kind: GeometryKind,
    vertices: Vec<DVec2>,
}

impl Geometry {
    pub fn new(kind: GeometryKind, vertices: Vec<DVec2>) -> Self {
        Self { kind, vertices }
    }

    pub fn point(x: f64, y: f64) -> Self {
        Self::new(GeometryKind::Point, vec![DVec2::new(x, y)])
    }

    pub fn line_string(coords: &[(f64, f64)]) -> Self {
        Self::new(GeometryKind::LineString, to_vertices(coords))
    }

    /// Polygon from its exterior ring. The ring may be open or closed.
    pub fn polygon(coords: &[(f64, f64)]) -> Self {
        Self::new(GeometryKind::Polygon, to_vertices(coords))
    }

    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Extent in feature coordinates, `None` for an empty geometry.
    pub fn envelope(&self) -> Option<Envelope> {
        Envelope::from_points(&self.vertices)
    }
}

fn to_vertices(coords: &[(f64, f64)]) -> Vec<DVec2> {
    coords.iter().map(|&(x, y)| DVec2::new(x, y)).collect()
}

/// A geographic feature: geometries plus attributes.
#[derive(Debug, Clone, Default)]
pub struct Feature {
    /// Unique feature identifier.
    pub id: u64,
    /// Geometry paths in feature coordinates.
    pub geometries: Vec<Geometry>,
    /// Properties/attributes, resolved by the caller's expression evaluator.
    pub properties: HashMap<String, String>,
}

impl Feature {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.add_geometry(geometry);
        self
    }

    pub fn with_property(mut self, key: &str, value: &str) -> Self {
        self.properties.insert(key.to_string(), value.to_string());
        self
    }

    pub fn add_geometry(&mut self, geometry: Geometry) {
        self.geometries.push(geometry);
    }

    pub fn paths(&self) -> &[Geometry] {
        &self.geometries
    }
}
