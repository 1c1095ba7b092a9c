//! Per-pass render state shared by label placement and line processing.

use glam::DVec2;

use crate::geo::{Envelope, GeoError, PixelTransform, ProjTransform, ViewTransform};

/// Projection, view and extent of the map pass currently being rendered.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    proj: &'a dyn ProjTransform,
    view: ViewTransform,
    /// Query extent in feature (layer) coordinates.
    query_extent: Envelope,
    scale_factor: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a context.
    ///
    /// The query extent defaults to the view extent carried into layer
    /// coordinates through `proj`. Fails when a corner cannot be projected.
    pub fn new(proj: &'a dyn ProjTransform, view: ViewTransform) -> Result<Self, GeoError> {
        let query_extent = layer_extent(proj, &view.extent())?;
        Ok(Self {
            proj,
            view,
            query_extent,
            scale_factor: 1.0,
        })
    }

    /// Override the query extent. `query_extent` is in layer coordinates,
    /// the same space as feature vertices.
    pub fn with_query_extent(mut self, query_extent: Envelope) -> Self {
        self.query_extent = query_extent;
        self
    }

    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn pixel_transform(&self) -> PixelTransform<'_> {
        PixelTransform::new(self.proj, &self.view)
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// Query extent in layer coordinates.
    pub fn query_extent(&self) -> Envelope {
        self.query_extent
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Output raster width in pixels.
    pub fn width(&self) -> u32 {
        self.view.size().0
    }
}

/// Bounding box of a map-space extent's corners in layer coordinates.
fn layer_extent(proj: &dyn ProjTransform, extent: &Envelope) -> Result<Envelope, GeoError> {
    let mut corners = [DVec2::ZERO; 4];
    for (out, corner) in corners.iter_mut().zip(extent.corners()) {
        *out = proj.forward(corner)?;
    }
    Envelope::from_points(&corners).ok_or_else(|| GeoError::Projection("empty query extent".to_string()))
}

impl std::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("view", &self.view)
            .field("query_extent", &self.query_extent)
            .field("scale_factor", &self.scale_factor)
            .finish()
    }
}
