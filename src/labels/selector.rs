//! Candidate selection for label placement.
//!
//! Filters a feature's geometries, optionally reduces them to the single
//! largest one, and for point-style placement turns each survivor into
//! pixel-space anchor points. The result is the search space handed to the
//! retry scheduler.

use glam::DVec2;

use crate::geo::algorithms::{centroid, interior_position, middle_point};
use crate::geo::{Envelope, Feature, Geometry, GeometryKind, PixelTransform};
use crate::labels::types::SearchMode;
use crate::style::types::{LabelPlacementMode, PlacementConfig};

/// Geometries and anchors a placement search runs over.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSet<'a> {
    /// Search mode fixed by the placement config.
    pub mode: SearchMode,
    /// Surviving geometries in feature order.
    pub geometries: Vec<&'a Geometry>,
    /// Pixel-space anchors; always empty in line mode.
    pub points: Vec<DVec2>,
}

impl CandidateSet<'_> {
    /// True when the active search space has nothing to try.
    pub fn is_empty(&self) -> bool {
        match self.mode {
            SearchMode::Line => self.geometries.is_empty(),
            SearchMode::Point => self.points.is_empty(),
        }
    }
}

/// Builds a [`CandidateSet`] for one feature under one placement config.
#[derive(Debug, Clone, Copy)]
pub struct GeometryCandidateSelector<'c> {
    config: &'c PlacementConfig,
    transform: PixelTransform<'c>,
}

impl<'c> GeometryCandidateSelector<'c> {
    pub fn new(config: &'c PlacementConfig, transform: PixelTransform<'c>) -> Self {
        Self { config, transform }
    }

    /// Filter, reduce and (for point modes) materialize anchors.
    pub fn select<'a>(&self, feature: &'a Feature) -> CandidateSet<'a> {
        let mode = if self.config.is_line_placement() {
            SearchMode::Line
        } else {
            SearchMode::Point
        };

        let mut geometries = self.filter_geometries(feature);
        if self.config.largest_bbox_only {
            geometries = self.keep_largest(geometries);
        }

        let points = match mode {
            SearchMode::Point if !geometries.is_empty() => self.anchor_points(feature.id, &geometries),
            _ => Vec::new(),
        };

        CandidateSet {
            mode,
            geometries,
            points,
        }
    }

    /// Drop empty geometries and polygons narrower than the minimum path length.
    pub fn filter_geometries<'a>(&self, feature: &'a Feature) -> Vec<&'a Geometry> {
        let minimum = self.config.minimum_path_length;

        feature
            .paths()
            .iter()
            .filter(|geom| !geom.is_empty())
            .filter(|geom| {
                if geom.kind() != GeometryKind::Polygon || minimum <= 0.0 {
                    return true;
                }
                match self.pixel_bbox(geom) {
                    Some(bbox) => bbox.width() >= minimum,
                    None => true,
                }
            })
            .collect()
    }

    /// Keep only the geometry with the greatest pixel-space bbox area.
    ///
    /// Equal areas keep the first geometry in feature order.
    pub fn keep_largest<'a>(&self, geometries: Vec<&'a Geometry>) -> Vec<&'a Geometry> {
        let mut largest: Option<(&'a Geometry, f64)> = None;
        for geom in geometries {
            let area = self.pixel_bbox(geom).map_or(0.0, |bbox| bbox.area());
            match largest {
                Some((_, best)) if area <= best => {}
                _ => largest = Some((geom, area)),
            }
        }
        largest.map(|(geom, _)| geom).into_iter().collect()
    }

    /// Pixel-space bounding box of a geometry, `None` if it cannot be projected.
    pub fn pixel_bbox(&self, geom: &Geometry) -> Option<Envelope> {
        let envelope = geom.envelope()?;
        match self.transform.envelope_to_pixel(&envelope) {
            Ok(bbox) => Some(bbox),
            Err(e) => {
                log::debug!("geometry extent could not be projected: {}", e);
                None
            }
        }
    }

    /// Anchor points for every geometry, in geometry then vertex order.
    fn anchor_points(&self, feature_id: u64, geometries: &[&Geometry]) -> Vec<DVec2> {
        let mode = self.config.placement;
        let mut points = Vec::new();

        for (index, geom) in geometries.iter().enumerate() {
            if mode == LabelPlacementMode::Vertex {
                points.extend(self.transform.path_to_pixel(geom.vertices()));
                continue;
            }

            // Lines always anchor at their midpoint, whatever the mode says.
            let anchor = if geom.kind() == GeometryKind::LineString {
                middle_point(geom.vertices())
            } else {
                match mode {
                    LabelPlacementMode::Point => centroid(geom),
                    LabelPlacementMode::Interior => interior_position(geom),
                    _ => {
                        log::error!(
                            "unknown placement type {:?} for geometry {} of feature {}",
                            mode,
                            index,
                            feature_id
                        );
                        None
                    }
                }
            };

            if let Some(point) = anchor {
                match self.transform.to_pixel(point) {
                    Ok(pixel) => points.push(pixel),
                    Err(e) => log::debug!("anchor of feature {} dropped: {}", feature_id, e),
                }
            }
        }

        points
    }
}

/// Select candidates for `feature` under `config`.
pub fn select<'a>(
    feature: &'a Feature,
    config: &PlacementConfig,
    transform: PixelTransform<'_>,
) -> CandidateSet<'a> {
    GeometryCandidateSelector::new(config, transform).select(feature)
}
