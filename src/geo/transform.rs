//! Feature-to-pixel coordinate conversion.
//!
//! Two collaborators take part: a [`ProjTransform`] between feature (layer)
//! coordinates and geographic (map) coordinates, and a [`MapTransform`]
//! from geographic coordinates to raster pixels. [`PixelTransform`] chains
//! them the way every placement and stroking path needs.

use glam::DVec2;

use super::bbox::Envelope;
use super::reproject::GeoError;

/// Conversion between feature coordinates and geographic coordinates.
pub trait ProjTransform {
    /// Geographic (map) coordinates to feature (layer) coordinates.
    fn forward(&self, point: DVec2) -> Result<DVec2, GeoError>;

    /// Feature (layer) coordinates to geographic (map) coordinates.
    fn backward(&self, point: DVec2) -> Result<DVec2, GeoError>;

    /// True when both sides share one coordinate system.
    fn is_identity(&self) -> bool {
        false
    }
}

/// Projection used when layer and map share a CRS.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityProjection;

impl ProjTransform for IdentityProjection {
    fn forward(&self, point: DVec2) -> Result<DVec2, GeoError> {
        Ok(point)
    }

    fn backward(&self, point: DVec2) -> Result<DVec2, GeoError> {
        Ok(point)
    }

    fn is_identity(&self) -> bool {
        true
    }
}

/// Conversion from geographic coordinates to raster pixels.
pub trait MapTransform {
    fn forward(&self, point: DVec2) -> DVec2;
}

/// Maps a geographic extent onto a `width` x `height` raster, y axis down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    width: u32,
    height: u32,
    extent: Envelope,
    scale: DVec2,
}

impl ViewTransform {
    /// Create a view transform for the given raster size and map extent.
    pub fn new(width: u32, height: u32, extent: Envelope) -> Self {
        let sx = if extent.width() > 0.0 {
            width as f64 / extent.width()
        } else {
            1.0
        };
        let sy = if extent.height() > 0.0 {
            height as f64 / extent.height()
        } else {
            1.0
        };
        Self {
            width,
            height,
            extent,
            scale: DVec2::new(sx, sy),
        }
    }

    /// Pixel back to geographic coordinates.
    pub fn backward(&self, pixel: DVec2) -> DVec2 {
        DVec2::new(
            pixel.x / self.scale.x + self.extent.min.x,
            self.extent.max.y - pixel.y / self.scale.y,
        )
    }

    pub fn extent(&self) -> Envelope {
        self.extent
    }

    /// Raster dimensions in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixels per map unit along each axis.
    pub fn scale(&self) -> DVec2 {
        self.scale
    }
}

impl MapTransform for ViewTransform {
    fn forward(&self, point: DVec2) -> DVec2 {
        DVec2::new(
            (point.x - self.extent.min.x) * self.scale.x,
            (self.extent.max.y - point.y) * self.scale.y,
        )
    }
}

/// Feature coordinates to pixels: inverse projection, then map transform.
#[derive(Clone, Copy)]
pub struct PixelTransform<'a> {
    proj: &'a dyn ProjTransform,
    view: &'a dyn MapTransform,
}

impl<'a> PixelTransform<'a> {
    pub fn new(proj: &'a dyn ProjTransform, view: &'a dyn MapTransform) -> Self {
        Self { proj, view }
    }

    pub fn proj(&self) -> &'a dyn ProjTransform {
        self.proj
    }

    /// Convert one feature-space vertex to pixel space.
    pub fn to_pixel(&self, point: DVec2) -> Result<DVec2, GeoError> {
        let geographic = self.proj.backward(point)?;
        Ok(self.view.forward(geographic))
    }

    /// Pixel-space bounding box of a feature-space envelope's four corners.
    pub fn envelope_to_pixel(&self, envelope: &Envelope) -> Result<Envelope, GeoError> {
        let mut corners = [DVec2::ZERO; 4];
        for (out, corner) in corners.iter_mut().zip(envelope.corners()) {
            *out = self.to_pixel(corner)?;
        }
        Envelope::from_points(&corners)
            .ok_or_else(|| GeoError::Projection("empty envelope".to_string()))
    }

    /// Convert a vertex path, dropping vertices the projection rejects.
    pub fn path_to_pixel(&self, points: &[DVec2]) -> Vec<DVec2> {
        points
            .iter()
            .filter_map(|p| self.to_pixel(*p).ok())
            .collect()
    }
}

impl std::fmt::Debug for PixelTransform<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelTransform")
            .field("identity_projection", &self.proj.is_identity())
            .finish()
    }
}
