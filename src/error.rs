//! Central error handling for the placement engine
//!
//! Rejected candidates are ordinary control flow and never surface here.
//! These errors cover configuration loading and coordinate conversion.

use crate::geo::GeoError;
use crate::style::StyleError;

/// Centralized error type for fallible placement operations
#[derive(thiserror::Error, Debug)]
pub enum PlacementError {
    #[error("Geo error: {0}")]
    Geo(#[from] GeoError),

    #[error("Style error: {0}")]
    Style(#[from] StyleError),

    #[error("Marker error: {0}")]
    Marker(String),
}

impl PlacementError {
    /// Short category name for log prefixes
    pub fn category(&self) -> &'static str {
        match self {
            PlacementError::Geo(_) => "Geo",
            PlacementError::Style(_) => "Style",
            PlacementError::Marker(_) => "Marker",
        }
    }

    pub fn marker<T: ToString>(msg: T) -> Self {
        PlacementError::Marker(msg.to_string())
    }
}

/// Result type alias for placement operations
pub type PlacementResult<T> = Result<T, PlacementError>;
