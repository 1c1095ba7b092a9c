//! Symbolizer configuration.
//!
//! Symbolizers arrive as JSON with kebab-case property names and are
//! deserialized into plain, already-evaluated values:
//! - `text`: label text placement
//! - `shield`: text plus a marker icon
//! - `line-pattern`: a marker image repeated along lines

pub mod converters;
pub mod parser;
pub mod types;

pub use converters::{evaluate_displacement, evaluate_transform};
pub use parser::{parse_symbolizer_str, parse_symbolizers, parse_symbolizers_str, StyleError};
pub use types::{
    LabelPlacementMode, LinePatternSymbolizer, PlacementConfig, ShieldSymbolizer,
    SimplifyAlgorithm, SymbolizerConfig, TextSymbolizer,
};
