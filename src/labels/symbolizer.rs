//! Text and shield entry points.
//!
//! Each helper evaluates its symbolizer for one feature, selects the
//! candidates, primes the engine and hands back a scheduler ready for
//! [`PlacementRetryScheduler::get`].

use glam::DVec2;

use crate::context::RenderContext;
use crate::geo::{Envelope, Feature};
use crate::labels::engine::PlacementEngine;
use crate::labels::marker::{resolve_marker, MarkerCache, ShieldMarker};
use crate::labels::scheduler::PlacementRetryScheduler;
use crate::labels::selector::GeometryCandidateSelector;
use crate::style::{evaluate_displacement, evaluate_transform, PlacementConfig, ShieldSymbolizer, TextSymbolizer};

/// Clip rectangle for line candidates, in feature coordinates.
fn label_clip_box(config: &PlacementConfig, ctx: &RenderContext<'_>) -> Option<Envelope> {
    config.clip.then(|| ctx.query_extent())
}

/// Start a text placement search for `feature`.
pub fn text_placements<'a, E: PlacementEngine>(
    feature: &'a Feature,
    sym: &'a TextSymbolizer,
    ctx: &'a RenderContext<'_>,
    mut engine: E,
) -> PlacementRetryScheduler<'a, E> {
    engine.set_displacement(evaluate_displacement(sym.placement.displacement, ctx.scale_factor()));
    let transform = ctx.pixel_transform();
    let candidates = GeometryCandidateSelector::new(&sym.placement, transform).select(feature);
    log::debug!(
        "text feature {}: {} geometries, {} anchors",
        feature.id,
        candidates.geometries.len(),
        candidates.points.len()
    );

    PlacementRetryScheduler::new(candidates, transform, engine)
        .with_clip_box(label_clip_box(&sym.placement, ctx))
        .with_points_on_line(false)
}

/// Start a shield placement search for `feature`.
///
/// The shield marker is attached to the engine before its first position is
/// selected. A shield without a resolvable marker places text only.
pub fn shield_placements<'a, E, C>(
    feature: &'a Feature,
    sym: &'a ShieldSymbolizer,
    ctx: &'a RenderContext<'_>,
    markers: &C,
    mut engine: E,
) -> PlacementRetryScheduler<'a, E>
where
    E: PlacementEngine,
    C: MarkerCache + ?Sized,
{
    engine.set_displacement(evaluate_displacement(sym.placement.displacement, ctx.scale_factor()));
    let transform = ctx.pixel_transform();
    let candidates = GeometryCandidateSelector::new(&sym.placement, transform).select(feature);

    if !candidates.is_empty() {
        if let Some(marker) = shield_marker(sym, markers) {
            engine.set_marker(marker);
        }
    }

    PlacementRetryScheduler::new(candidates, transform, engine)
        .with_clip_box(label_clip_box(&sym.placement, ctx))
        .with_points_on_line(true)
}

/// Resolve and evaluate the shield marker.
///
/// Returns `None` when the file name is empty or the cache has no entry.
pub fn shield_marker<C: MarkerCache + ?Sized>(sym: &ShieldSymbolizer, markers: &C) -> Option<ShieldMarker> {
    if sym.file.is_empty() {
        return None;
    }
    let marker = match resolve_marker(markers, &sym.file) {
        Ok(marker) => marker,
        Err(e) => {
            log::warn!("shield: {}", e);
            return None;
        }
    };

    let transform = evaluate_transform(sym.image_transform, 1.0);
    let bounds = marker.transformed_bounds(&transform);

    Some(ShieldMarker {
        marker,
        transform,
        bounds,
        unlock_image: sym.unlock_image,
        displacement: DVec2::new(sym.shield_dx, sym.shield_dy),
    })
}
