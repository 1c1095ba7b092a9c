//! Label placement and line geometry preparation for map rendering.
//!
//! Given a feature's geometries and an evaluated symbolizer, the crate
//! selects label candidates, drives a placement engine through them with
//! position retries, and prepares line geometry for pattern rendering.
//!
//! - `labels`: candidate selection, retry scheduling, engines, collision
//! - `vector`: clip/project/offset/affine/simplify/smooth pipeline
//! - `geo`: envelopes, geometries, anchors, coordinate transforms
//! - `style`: serde symbolizer configuration

pub mod context;
pub mod error;
pub mod geo;
pub mod labels;
pub mod style;
pub mod vector;

pub use context::RenderContext;
pub use error::{PlacementError, PlacementResult};
pub use geo::{Envelope, Feature, Geometry, GeometryKind, GeoError};
pub use labels::{
    BoxPlacementEngine, CollisionDetector, CollisionGrid, GeometryCandidateSelector, LabelBox,
    LabelRTree, MarkerCache, MarkerStore, Placement, PlacementEngine, PlacementRetryScheduler,
    SearchState,
};
pub use style::{LabelPlacementMode, PlacementConfig, SymbolizerConfig};
pub use vector::{process_line_pattern, PathSink, VertexConverter};
