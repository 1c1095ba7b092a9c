//! Converters from evaluated symbolizer properties to geometry types.

use glam::{DAffine2, DMat2, DVec2};

/// Build an affine transform from an SVG-order matrix `[a, b, c, d, e, f]`.
///
/// The translation part is multiplied by `scale_factor` so pixel offsets
/// keep their visual size at higher output resolutions. `None` yields the
/// identity.
pub fn evaluate_transform(matrix: Option<[f64; 6]>, scale_factor: f64) -> DAffine2 {
    match matrix {
        Some([a, b, c, d, e, f]) => DAffine2::from_mat2_translation(
            DMat2::from_cols(DVec2::new(a, b), DVec2::new(c, d)),
            DVec2::new(e, f) * scale_factor,
        ),
        None => DAffine2::IDENTITY,
    }
}

/// Displacement vector from a `[dx, dy]` pair scaled by the render scale factor.
pub fn evaluate_displacement(displacement: [f64; 2], scale_factor: f64) -> DVec2 {
    DVec2::from_array(displacement) * scale_factor
}
