// tests/test_candidate_selector.rs
// Geometry filtering, largest-bbox reduction and anchor derivation per placement mode

use carto_place::geo::{Envelope, Feature, Geometry, IdentityProjection, PixelTransform, ViewTransform};
use carto_place::labels::{select, BoxPlacementEngine, CollisionGrid, LabelBox, PlacementRetryScheduler, SearchMode};
use carto_place::style::{LabelPlacementMode, PlacementConfig};
use glam::DVec2;

fn view() -> ViewTransform {
    ViewTransform::new(100, 100, Envelope::from_coords(0.0, 0.0, 100.0, 100.0))
}

fn rect(x: f64, y: f64, w: f64, h: f64) -> Geometry {
    Geometry::polygon(&[(x, y), (x + w, y), (x + w, y + h), (x, y + h)])
}

#[test]
fn test_zero_geometries_yield_no_placements() {
    let proj = IdentityProjection;
    let view = view();
    let transform = PixelTransform::new(&proj, &view);
    let feature = Feature::new(1);
    let config = PlacementConfig::default();

    let candidates = select(&feature, &config, transform);
    assert!(candidates.is_empty());

    let mut grid = CollisionGrid::new(100, 100, 10);
    let engine = BoxPlacementEngine::new(&mut grid, vec![LabelBox::new(5.0, 5.0)]);
    let mut scheduler = PlacementRetryScheduler::new(candidates, transform, engine);
    assert!(scheduler.get().is_empty());
    // Engine was never advanced
    assert_eq!(scheduler.engine().position(), None);
}

#[test]
fn test_largest_bbox_only_keeps_biggest_area() {
    let proj = IdentityProjection;
    let view = view();
    let small = rect(0.0, 0.0, 2.0, 5.0);
    let large = rect(10.0, 10.0, 5.0, 8.0);
    let medium = rect(30.0, 30.0, 5.0, 5.0);
    let feature = Feature::new(2)
        .with_geometry(small)
        .with_geometry(large.clone())
        .with_geometry(medium);

    let config = PlacementConfig::default().with_largest_bbox_only(true);
    let candidates = select(&feature, &config, PixelTransform::new(&proj, &view));
    assert_eq!(candidates.geometries, vec![&large]);
    assert_eq!(candidates.points.len(), 1);

    let config = PlacementConfig::default().with_largest_bbox_only(false);
    let candidates = select(&feature, &config, PixelTransform::new(&proj, &view));
    assert_eq!(candidates.geometries.len(), 3);
    assert_eq!(candidates.points.len(), 3);
}

#[test]
fn test_vertex_mode_yields_every_vertex_in_order() {
    let proj = IdentityProjection;
    let view = view();
    let feature = Feature::new(3).with_geometry(Geometry::line_string(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]));
    let config = PlacementConfig::default().with_placement(LabelPlacementMode::Vertex);

    let candidates = select(&feature, &config, PixelTransform::new(&proj, &view));
    assert_eq!(candidates.mode, SearchMode::Point);
    assert_eq!(
        candidates.points,
        vec![DVec2::new(0.0, 100.0), DVec2::new(10.0, 100.0), DVec2::new(10.0, 90.0)]
    );
}

#[test]
fn test_line_string_in_point_mode_uses_midpoint() {
    let proj = IdentityProjection;
    let view = view();
    // L-shape: arc-length midpoint is the corner, the centroid is not
    let feature = Feature::new(4).with_geometry(Geometry::line_string(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]));
    let config = PlacementConfig::default().with_placement(LabelPlacementMode::Point);

    let candidates = select(&feature, &config, PixelTransform::new(&proj, &view));
    assert_eq!(candidates.points, vec![DVec2::new(10.0, 100.0)]);
}

#[test]
fn test_line_mode_keeps_geometries_only() {
    let proj = IdentityProjection;
    let view = view();
    let feature = Feature::new(5)
        .with_geometry(Geometry::line_string(&[(0.0, 0.0), (50.0, 0.0)]))
        .with_geometry(Geometry::new(carto_place::GeometryKind::LineString, Vec::new()));
    let config = PlacementConfig::default()
        .with_placement(LabelPlacementMode::Line)
        .with_largest_bbox_only(false);

    let candidates = select(&feature, &config, PixelTransform::new(&proj, &view));
    assert_eq!(candidates.mode, SearchMode::Line);
    assert_eq!(candidates.geometries.len(), 1);
    assert!(candidates.points.is_empty());
}

#[test]
fn test_minimum_path_length_measured_in_pixels() {
    let proj = IdentityProjection;
    // 10 map units per pixel
    let view = ViewTransform::new(100, 100, Envelope::from_coords(0.0, 0.0, 1000.0, 1000.0));
    let narrow = rect(100.0, 100.0, 50.0, 50.0);
    let wide = rect(500.0, 500.0, 200.0, 200.0);
    let feature = Feature::new(6).with_geometry(narrow).with_geometry(wide.clone());
    let config = PlacementConfig::default()
        .with_minimum_path_length(10.0)
        .with_largest_bbox_only(false);

    // 50 units clear the minimum in map units but are only 5 px wide
    let candidates = select(&feature, &config, PixelTransform::new(&proj, &view));
    assert_eq!(candidates.geometries, vec![&wide]);
    assert_eq!(candidates.points.len(), 1);
    assert!(candidates.points[0].abs_diff_eq(DVec2::new(60.0, 40.0), 1e-9));
}
