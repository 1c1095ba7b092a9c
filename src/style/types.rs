//! Symbolizer configuration types.
//!
//! Every field arrives already evaluated against the feature: expression
//! evaluation happens upstream, so these are plain scalars.

use serde::{Deserialize, Serialize};

/// How label anchors are derived from a feature's geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPlacementMode {
    /// One anchor per geometry at its centroid.
    #[default]
    Point,
    /// Labels follow the geometry path itself.
    Line,
    /// One anchor per vertex.
    Vertex,
    /// One anchor per geometry, guaranteed inside polygons.
    Interior,
    /// Any unrecognized placement string.
    #[serde(other)]
    Unknown,
}

/// Line simplification algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimplifyAlgorithm {
    /// Drop vertices closer than the tolerance to the last kept vertex.
    #[default]
    RadialDistance,
    /// Ramer-Douglas-Peucker perpendicular distance simplification.
    DouglasPeucker,
}

/// Placement and geometry-preparation properties shared by all symbolizers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PlacementConfig {
    /// Placement mode.
    pub placement: LabelPlacementMode,
    /// Clip geometries against the query extent before use.
    pub clip: bool,
    /// Polygons narrower than this (pixels) are not labelled. 0 disables.
    pub minimum_path_length: f64,
    /// Only label the geometry with the largest pixel-space bounding box.
    pub largest_bbox_only: bool,
    /// Parallel offset in pixels (before scale factor).
    pub offset: f64,
    /// Simplification tolerance in pixels. 0 disables.
    pub simplify_tolerance: f64,
    /// Simplification algorithm.
    pub simplify_algorithm: SimplifyAlgorithm,
    /// Corner smoothing factor in [0, 1]. 0 disables.
    pub smooth: f64,
    /// Label displacement (dx, dy) in pixels.
    pub displacement: [f64; 2],
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            placement: LabelPlacementMode::Point,
            clip: false,
            minimum_path_length: 0.0,
            largest_bbox_only: true,
            offset: 0.0,
            simplify_tolerance: 0.0,
            simplify_algorithm: SimplifyAlgorithm::RadialDistance,
            smooth: 0.0,
            displacement: [0.0, 0.0],
        }
    }
}

impl PlacementConfig {
    /// Set the placement mode.
    pub fn with_placement(mut self, placement: LabelPlacementMode) -> Self {
        self.placement = placement;
        self
    }

    /// Enable/disable clipping.
    pub fn with_clip(mut self, clip: bool) -> Self {
        self.clip = clip;
        self
    }

    /// Set the minimum polygon width in pixels.
    pub fn with_minimum_path_length(mut self, length: f64) -> Self {
        self.minimum_path_length = length;
        self
    }

    /// Enable/disable largest-bbox-only reduction.
    pub fn with_largest_bbox_only(mut self, enabled: bool) -> Self {
        self.largest_bbox_only = enabled;
        self
    }

    /// Set the parallel offset.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Set the simplification tolerance.
    pub fn with_simplify(mut self, tolerance: f64, algorithm: SimplifyAlgorithm) -> Self {
        self.simplify_tolerance = tolerance;
        self.simplify_algorithm = algorithm;
        self
    }

    /// Set the smoothing factor.
    pub fn with_smooth(mut self, smooth: f64) -> Self {
        self.smooth = smooth;
        self
    }

    /// Set the label displacement.
    pub fn with_displacement(mut self, dx: f64, dy: f64) -> Self {
        self.displacement = [dx, dy];
        self
    }

    pub fn is_line_placement(&self) -> bool {
        self.placement == LabelPlacementMode::Line
    }
}

/// Text symbolizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TextSymbolizer {
    /// Attribute holding the label text.
    pub name: String,
    #[serde(flatten)]
    pub placement: PlacementConfig,
}

/// Shield symbolizer: text plus a marker icon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ShieldSymbolizer {
    /// Attribute holding the label text.
    pub name: String,
    /// Marker file, resolved through the marker cache.
    pub file: String,
    /// Evaluated image transform as an SVG-order matrix `[a, b, c, d, e, f]`.
    pub image_transform: Option<[f64; 6]>,
    /// Place the marker at the anchor independent of text displacement.
    pub unlock_image: bool,
    /// Marker displacement in pixels.
    pub shield_dx: f64,
    pub shield_dy: f64,
    #[serde(flatten)]
    pub placement: PlacementConfig,
}

/// Line-pattern symbolizer: a marker image repeated along each line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LinePatternSymbolizer {
    /// Pattern marker file, resolved through the marker cache.
    pub file: String,
    /// Evaluated image transform for vector patterns.
    pub image_transform: Option<[f64; 6]>,
    /// Evaluated geometry transform applied in pixel space.
    pub geometry_transform: Option<[f64; 6]>,
    #[serde(flatten)]
    pub placement: PlacementConfig,
}

/// Any supported symbolizer, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SymbolizerConfig {
    Text(TextSymbolizer),
    Shield(ShieldSymbolizer),
    LinePattern(LinePatternSymbolizer),
}

impl SymbolizerConfig {
    pub fn placement(&self) -> &PlacementConfig {
        match self {
            SymbolizerConfig::Text(sym) => &sym.placement,
            SymbolizerConfig::Shield(sym) => &sym.placement,
            SymbolizerConfig::LinePattern(sym) => &sym.placement,
        }
    }
}
