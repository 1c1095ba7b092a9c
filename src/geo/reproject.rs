// src/geo/reproject.rs
// CRS transforms between layer and map coordinate systems (PROJ-backed, feature-gated)
// RELEVANT FILES: src/geo/mod.rs, src/geo/transform.rs

use thiserror::Error;

#[cfg(feature = "proj")]
use glam::DVec2;

use super::transform::{IdentityProjection, ProjTransform};

/// Error type for geographic operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("Projection error: {0}")]
    Projection(String),

    #[error("Invalid CRS: {0}")]
    InvalidCrs(String),

    #[error("PROJ feature not enabled")]
    ProjNotAvailable,
}

/// Get the EPSG code from a CRS string if it's in EPSG format.
pub fn parse_epsg_code(crs: &str) -> Option<u32> {
    let crs_upper = crs.trim().to_uppercase();
    crs_upper.strip_prefix("EPSG:")?.parse::<u32>().ok()
}

/// Check if two CRS strings refer to the same coordinate system.
pub fn crs_equal(crs1: &str, crs2: &str) -> bool {
    if crs1 == crs2 {
        return true;
    }

    match (parse_epsg_code(crs1), parse_epsg_code(crs2)) {
        (Some(c1), Some(c2)) => c1 == c2,
        _ => false,
    }
}

/// Projection from a layer's CRS into the map's CRS.
///
/// Equal CRS strings give the identity. Anything else needs the `proj`
/// feature.
pub fn layer_projection(layer_crs: &str, map_crs: &str) -> Result<Box<dyn ProjTransform>, GeoError> {
    if crs_equal(layer_crs, map_crs) {
        return Ok(Box::new(IdentityProjection));
    }

    #[cfg(feature = "proj")]
    {
        Ok(Box::new(CrsTransform::new(layer_crs, map_crs)?))
    }
    #[cfg(not(feature = "proj"))]
    {
        log::error!("cannot reproject {} -> {} without the proj feature", layer_crs, map_crs);
        Err(GeoError::ProjNotAvailable)
    }
}

/// Layer-to-map transform backed by PROJ.
///
/// `backward` converts layer coordinates into the map CRS, `forward` the
/// reverse. Equal CRS strings short-circuit to the identity.
#[cfg(feature = "proj")]
pub struct CrsTransform {
    to_map: Option<proj::Proj>,
    to_layer: Option<proj::Proj>,
}

#[cfg(feature = "proj")]
impl CrsTransform {
    pub fn new(layer_crs: &str, map_crs: &str) -> Result<Self, GeoError> {
        if crs_equal(layer_crs, map_crs) {
            return Ok(Self {
                to_map: None,
                to_layer: None,
            });
        }

        let to_map = proj::Proj::new_known_crs(layer_crs, map_crs, None)
            .map_err(|e| GeoError::InvalidCrs(format!("{} -> {}: {}", layer_crs, map_crs, e)))?;
        let to_layer = proj::Proj::new_known_crs(map_crs, layer_crs, None)
            .map_err(|e| GeoError::InvalidCrs(format!("{} -> {}: {}", map_crs, layer_crs, e)))?;

        Ok(Self {
            to_map: Some(to_map),
            to_layer: Some(to_layer),
        })
    }

    fn convert(transformer: &Option<proj::Proj>, point: DVec2) -> Result<DVec2, GeoError> {
        match transformer {
            None => Ok(point),
            Some(t) => t
                .convert((point.x, point.y))
                .map(|(x, y)| DVec2::new(x, y))
                .map_err(|e| {
                    GeoError::Projection(format!(
                        "Transform failed at ({}, {}): {}",
                        point.x, point.y, e
                    ))
                }),
        }
    }
}

#[cfg(feature = "proj")]
impl ProjTransform for CrsTransform {
    fn forward(&self, point: DVec2) -> Result<DVec2, GeoError> {
        Self::convert(&self.to_layer, point)
    }

    fn backward(&self, point: DVec2) -> Result<DVec2, GeoError> {
        Self::convert(&self.to_map, point)
    }

    fn is_identity(&self) -> bool {
        self.to_map.is_none()
    }
}
