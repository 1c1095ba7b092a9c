// src/vector/line_pattern.rs
// Line-pattern symbolizer geometry preparation: marker lookup, clip padding and pipeline setup
// RELEVANT FILES: src/vector/pipeline.rs, src/labels/marker.rs, src/style/types.rs

use crate::context::RenderContext;
use crate::geo::Feature;
use crate::labels::marker::{resolve_marker, MarkerCache};
use crate::style::{evaluate_transform, LinePatternSymbolizer};
use crate::vector::pipeline::{PathSink, VertexConverter};

/// Padding, in layer units, added around the query extent when clipping
/// line-pattern geometries.
///
/// Starts at one pixel, grows with the pattern's half width when that is
/// more than a pixel, with `1.2 * |offset|` when the line is offset, and
/// finally with the scale factor.
pub fn clip_padding(
    query_extent_width: f64,
    pixmap_width: u32,
    pattern_width: f64,
    offset: f64,
    scale_factor: f64,
) -> f64 {
    let mut padding = query_extent_width / f64::from(pixmap_width.max(1));
    let half_stroke = pattern_width / 2.0;
    if half_stroke > 1.0 {
        padding *= half_stroke;
    }
    if offset.abs() > 0.0 {
        padding *= offset.abs() * 1.2;
    }
    padding * scale_factor
}

/// Prepare every path of `feature` for a line-pattern symbolizer and hand
/// the results to `sink`.
///
/// Returns the number of paths emitted. Nothing is emitted when the marker
/// file is empty or unknown to `markers`.
pub fn process_line_pattern<S, C>(
    sym: &LinePatternSymbolizer,
    feature: &Feature,
    ctx: &RenderContext<'_>,
    markers: &C,
    sink: &mut S,
) -> usize
where
    S: PathSink + ?Sized,
    C: MarkerCache + ?Sized,
{
    if sym.file.is_empty() {
        return 0;
    }
    let marker = match resolve_marker(markers, &sym.file) {
        Ok(marker) => marker,
        Err(e) => {
            log::warn!("line pattern: {}", e);
            return 0;
        }
    };

    let config = &sym.placement;
    let scale_factor = ctx.scale_factor();
    let affine = evaluate_transform(sym.geometry_transform, scale_factor);

    let mut clip_box = ctx.query_extent();
    if config.clip {
        // Native marker width; the scale factor is applied once inside.
        let padding = clip_padding(clip_box.width(), ctx.width(), marker.width, config.offset, scale_factor);
        clip_box = clip_box.pad(padding);
    }

    let converter = VertexConverter::new(config, clip_box, ctx.pixel_transform(), affine, scale_factor);
    let emitted: usize = feature
        .paths()
        .iter()
        .filter(|geom| geom.len() > 1)
        .map(|geom| converter.apply(geom, &mut *sink))
        .sum();

    log::debug!("line pattern '{}': feature {} emitted {} paths", sym.file, feature.id, emitted);
    emitted
}
