//! Label placement for map features.
//!
//! Provides:
//! - `GeometryCandidateSelector` for filtering geometries and deriving anchors
//! - `PlacementRetryScheduler` for retrying candidates across position variants
//! - `PlacementEngine` trait with a fixed-box reference engine
//! - Grid-based and R-tree collision detection
//! - Shield marker lookup and bounds
//! - Text and shield symbolizer entry points

pub mod collision;
pub mod engine;
pub mod marker;
pub mod rtree;
pub mod scheduler;
pub mod selector;
pub mod symbolizer;
mod types;

pub use collision::{CollisionDetector, CollisionGrid};
pub use engine::{BoxPlacementEngine, LabelBox, PlacementEngine};
pub use marker::{resolve_marker, Marker, MarkerCache, MarkerKind, MarkerStore, ShieldMarker};
pub use rtree::{LabelBounds, LabelRTree};
pub use scheduler::PlacementRetryScheduler;
pub use selector::{select, CandidateSet, GeometryCandidateSelector};
pub use symbolizer::{shield_marker, shield_placements, text_placements};
pub use types::{Placement, SearchMode, SearchState};
