// src/geo/mod.rs
// Geographic utilities: envelopes, feature geometry, label anchors and coordinate transforms
// RELEVANT FILES: src/geo/transform.rs, src/geo/reproject.rs, src/labels/selector.rs

pub mod algorithms;
pub mod bbox;
pub mod geometry;
pub mod reproject;
pub mod transform;

// Re-export main types and functions
pub use algorithms::{centroid, interior_position, middle_point, path_length, point_in_ring};
pub use bbox::Envelope;
pub use geometry::{Feature, Geometry, GeometryKind};
pub use reproject::{layer_projection, GeoError};
pub use transform::{IdentityProjection, MapTransform, PixelTransform, ProjTransform, ViewTransform};

#[cfg(feature = "proj")]
pub use reproject::CrsTransform;
