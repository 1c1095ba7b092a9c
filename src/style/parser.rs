//! Symbolizer configuration parser.

use std::fs;
use std::path::Path;

use crate::style::types::{PlacementConfig, SymbolizerConfig};

/// Error type for style parsing.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid style: {0}")]
    Invalid(String),
}

/// Parse a list of symbolizers from a JSON file.
pub fn parse_symbolizers(path: &Path) -> Result<Vec<SymbolizerConfig>, StyleError> {
    let content = fs::read_to_string(path)?;
    parse_symbolizers_str(&content)
}

/// Parse a list of symbolizers from a JSON array string.
pub fn parse_symbolizers_str(json: &str) -> Result<Vec<SymbolizerConfig>, StyleError> {
    let symbolizers: Vec<SymbolizerConfig> = serde_json::from_str(json)?;
    for sym in &symbolizers {
        validate_symbolizer(sym)?;
    }
    Ok(symbolizers)
}

/// Parse a single symbolizer from a JSON object string.
pub fn parse_symbolizer_str(json: &str) -> Result<SymbolizerConfig, StyleError> {
    let sym: SymbolizerConfig = serde_json::from_str(json)?;
    validate_symbolizer(&sym)?;
    Ok(sym)
}

/// Validate a parsed symbolizer.
pub fn validate_symbolizer(sym: &SymbolizerConfig) -> Result<(), StyleError> {
    validate_placement(sym.placement())?;
    match sym {
        SymbolizerConfig::LinePattern(pattern) if pattern.file.is_empty() => Err(
            StyleError::Invalid("line-pattern symbolizer requires a file".to_string()),
        ),
        _ => Ok(()),
    }
}

/// Validate numeric placement properties.
pub fn validate_placement(config: &PlacementConfig) -> Result<(), StyleError> {
    let numbers = [
        ("minimum-path-length", config.minimum_path_length),
        ("offset", config.offset),
        ("simplify-tolerance", config.simplify_tolerance),
        ("smooth", config.smooth),
        ("displacement.dx", config.displacement[0]),
        ("displacement.dy", config.displacement[1]),
    ];
    if let Some((name, _)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
        return Err(StyleError::Invalid(format!("{} must be finite", name)));
    }
    if config.minimum_path_length < 0.0 {
        return Err(StyleError::Invalid(format!(
            "minimum-path-length must be >= 0 (got {})",
            config.minimum_path_length
        )));
    }
    if config.simplify_tolerance < 0.0 {
        return Err(StyleError::Invalid(format!(
            "simplify-tolerance must be >= 0 (got {})",
            config.simplify_tolerance
        )));
    }
    if !(0.0..=1.0).contains(&config.smooth) {
        return Err(StyleError::Invalid(format!(
            "smooth must be within [0, 1] (got {})",
            config.smooth
        )));
    }
    Ok(())
}
