// tests/test_transform_pipeline.rs
// Line-pattern geometry preparation: clip padding, stage order and pixel-space output

use carto_place::geo::{Envelope, Feature, GeoError, Geometry, IdentityProjection, ProjTransform, ViewTransform};
use carto_place::labels::{Marker, MarkerStore};
use carto_place::style::{LinePatternSymbolizer, PlacementConfig, SimplifyAlgorithm};
use carto_place::vector::{clip_padding, process_line_pattern};
use carto_place::RenderContext;
use glam::DVec2;

fn view() -> ViewTransform {
    // 2 map units per pixel
    ViewTransform::new(500, 500, Envelope::from_coords(0.0, 0.0, 1000.0, 1000.0))
}

fn store() -> MarkerStore {
    let mut store = MarkerStore::new();
    store.insert("arrow.png", Marker::bitmap(6.0, 4.0));
    store
}

fn pattern(placement: PlacementConfig) -> LinePatternSymbolizer {
    LinePatternSymbolizer {
        file: "arrow.png".to_string(),
        placement,
        ..Default::default()
    }
}

#[test]
fn test_clip_padding_example() {
    // 1000 / 500 * 3 * 2
    assert_eq!(clip_padding(1000.0, 500, 6.0, 0.0, 2.0), 12.0);
}

#[test]
fn test_clip_box_is_padded() -> anyhow::Result<()> {
    let proj = IdentityProjection;
    let ctx = RenderContext::new(&proj, view())?.with_scale_factor(2.0);
    let feature = Feature::new(1).with_geometry(Geometry::line_string(&[(-20.0, 500.0), (500.0, 500.0)]));
    let sym = pattern(PlacementConfig::default().with_clip(true));

    let mut paths: Vec<Vec<DVec2>> = Vec::new();
    let emitted = process_line_pattern(&sym, &feature, &ctx, &store(), &mut paths);
    assert_eq!(emitted, 1);

    let start = paths.first().and_then(|p| p.first()).copied().ok_or_else(|| anyhow::anyhow!("no path"))?;
    // Clipped at x = -12 map units, i.e. -6 px
    assert!((start.x + 6.0).abs() < 1e-9, "start was {start:?}");
    assert!((start.y - 250.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_simplify_and_smooth_output_pixels() {
    let proj = IdentityProjection;
    let ctx = RenderContext::new(&proj, view()).unwrap();
    let feature = Feature::new(2).with_geometry(Geometry::line_string(&[
        (0.0, 0.0),
        (200.0, 1.0),
        (400.0, 600.0),
        (800.0, 200.0),
        (1000.0, 1000.0),
    ]));
    let sym = pattern(
        PlacementConfig::default()
            .with_simplify(1.0, SimplifyAlgorithm::DouglasPeucker)
            .with_smooth(0.5),
    );

    let mut paths: Vec<Vec<DVec2>> = Vec::new();
    assert_eq!(process_line_pattern(&sym, &feature, &ctx, &store(), &mut paths), 1);

    let path = &paths[0];
    assert_eq!(path[0], DVec2::new(0.0, 500.0));
    assert_eq!(*path.last().unwrap(), DVec2::new(500.0, 0.0));
    // Smoothing curves stay near the pixel-space polyline, far from feature units
    assert!(path.iter().all(|p| p.x >= -50.0 && p.x <= 550.0 && p.y >= -50.0 && p.y <= 550.0));
    assert!(path.len() > 5);
}

#[test]
fn test_geometry_transform_translation_scaled() {
    let proj = IdentityProjection;
    let ctx = RenderContext::new(&proj, view()).unwrap().with_scale_factor(2.0);
    let feature = Feature::new(3).with_geometry(Geometry::line_string(&[(0.0, 0.0), (100.0, 0.0)]));
    let sym = LinePatternSymbolizer {
        geometry_transform: Some([1.0, 0.0, 0.0, 1.0, 5.0, 0.0]),
        ..pattern(PlacementConfig::default())
    };

    let mut paths: Vec<Vec<DVec2>> = Vec::new();
    process_line_pattern(&sym, &feature, &ctx, &store(), &mut paths);
    assert_eq!(paths, vec![vec![DVec2::new(10.0, 500.0), DVec2::new(60.0, 500.0)]]);
}

#[test]
fn test_missing_marker_draws_nothing() {
    let proj = IdentityProjection;
    let ctx = RenderContext::new(&proj, view()).unwrap();
    let feature = Feature::new(4).with_geometry(Geometry::line_string(&[(0.0, 0.0), (100.0, 0.0)]));

    let mut paths: Vec<Vec<DVec2>> = Vec::new();
    let missing = LinePatternSymbolizer {
        file: "missing.png".to_string(),
        ..Default::default()
    };
    assert_eq!(process_line_pattern(&missing, &feature, &ctx, &store(), &mut paths), 0);
    assert_eq!(process_line_pattern(&LinePatternSymbolizer::default(), &feature, &ctx, &store(), &mut paths), 0);
    assert!(paths.is_empty());
}

#[test]
fn test_short_geometries_skipped() {
    let proj = IdentityProjection;
    let ctx = RenderContext::new(&proj, view()).unwrap();
    let feature = Feature::new(5)
        .with_geometry(Geometry::point(10.0, 10.0))
        .with_geometry(Geometry::line_string(&[(0.0, 0.0), (100.0, 0.0)]));

    let mut paths: Vec<Vec<DVec2>> = Vec::new();
    assert_eq!(process_line_pattern(&pattern(PlacementConfig::default()), &feature, &ctx, &store(), &mut paths), 1);
}

#[test]
fn test_vector_marker_padded_like_bitmap() -> anyhow::Result<()> {
    let proj = IdentityProjection;
    let ctx = RenderContext::new(&proj, view())?.with_scale_factor(2.0);
    let mut markers = MarkerStore::new();
    markers.insert("arrow.svg", Marker::vector(6.0, 4.0));
    let feature = Feature::new(6).with_geometry(Geometry::line_string(&[(-20.0, 500.0), (500.0, 500.0)]));
    let sym = LinePatternSymbolizer {
        file: "arrow.svg".to_string(),
        ..pattern(PlacementConfig::default().with_clip(true))
    };

    let mut paths: Vec<Vec<DVec2>> = Vec::new();
    assert_eq!(process_line_pattern(&sym, &feature, &ctx, &markers, &mut paths), 1);

    // 12 map units of padding, same as the 6 px bitmap
    let start = paths[0][0];
    assert!((start.x + 6.0).abs() < 1e-9, "start was {start:?}");
    assert!((start.y - 250.0).abs() < 1e-9);
    Ok(())
}

/// Layer coordinates are map coordinates times 1000.
struct Millis;

impl ProjTransform for Millis {
    fn forward(&self, point: DVec2) -> Result<DVec2, GeoError> {
        Ok(point * 1000.0)
    }

    fn backward(&self, point: DVec2) -> Result<DVec2, GeoError> {
        Ok(point / 1000.0)
    }
}

#[test]
fn test_clip_padding_in_layer_units() -> anyhow::Result<()> {
    let ctx = RenderContext::new(&Millis, view())?;
    assert_eq!(ctx.query_extent(), Envelope::from_coords(0.0, 0.0, 1_000_000.0, 1_000_000.0));
    let feature = Feature::new(7).with_geometry(Geometry::line_string(&[(-20_000.0, 500_000.0), (500_000.0, 500_000.0)]));
    let sym = pattern(PlacementConfig::default().with_clip(true));

    let mut paths: Vec<Vec<DVec2>> = Vec::new();
    assert_eq!(process_line_pattern(&sym, &feature, &ctx, &store(), &mut paths), 1);

    // 2000 layer units per pixel * 3 = 6000, i.e. 3 px
    let path = &paths[0];
    assert!((path[0].x + 3.0).abs() < 1e-9, "start was {:?}", path[0]);
    assert!((path[0].y - 250.0).abs() < 1e-9);
    assert!((path[path.len() - 1].x - 250.0).abs() < 1e-9);
    Ok(())
}
