//! Label placement types and data structures.

use glam::DVec2;

use crate::geo::Envelope;

/// An accepted label placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<P> {
    /// Anchor position in pixels.
    pub anchor: DVec2,
    /// Orientation in radians (0 = horizontal).
    pub angle: f64,
    /// Index of the position variant that was active when accepted.
    pub position: usize,
    /// Pixel-space bounds recorded in the collision detector.
    pub bounds: Envelope,
    /// Engine-specific data (glyph run, size step, ...).
    pub payload: P,
}

/// Search progress of a placement scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Candidates remain to be tried at the current position.
    Scanning,
    /// The last step produced a placement.
    Found,
    /// No further placements can be produced. Terminal.
    Exhausted,
}

/// Which candidate list drives the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Geometries are offered as pixel paths.
    Line,
    /// Anchor points are offered one by one.
    Point,
}
