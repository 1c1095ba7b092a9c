//! Label anchor algorithms.
//!
//! Computes the single anchor point a non-line placement uses for a
//! geometry: arc-length midpoints for lines, area-weighted centroids, and
//! interior points guaranteed to fall inside a polygon ring.

use glam::DVec2;

use super::geometry::{Geometry, GeometryKind};

/// Compute total path length.
pub fn path_length(points: &[DVec2]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Sample position and tangent angle (radians) at a distance along the path.
///
/// Distances past the end clamp to the last vertex; negative distances and
/// paths with fewer than two vertices yield `None`.
pub fn point_at_distance(points: &[DVec2], distance: f64) -> Option<(DVec2, f64)> {
    if points.len() < 2 || distance < 0.0 {
        return None;
    }

    let mut accumulated = 0.0;
    for w in points.windows(2) {
        let delta = w[1] - w[0];
        let segment_length = delta.length();

        if segment_length > 0.0 && accumulated + segment_length >= distance {
            let t = (distance - accumulated) / segment_length;
            return Some((w[0].lerp(w[1], t), delta.y.atan2(delta.x)));
        }

        accumulated += segment_length;
    }

    // Past end of path - return last point
    let last = points.len() - 1;
    let delta = points[last] - points[last - 1];
    Some((points[last], delta.y.atan2(delta.x)))
}

/// Point halfway along the path by arc length.
///
/// A single vertex is its own midpoint. Empty paths have none.
pub fn middle_point(points: &[DVec2]) -> Option<DVec2> {
    let first = *points.first()?;
    let total = path_length(points);
    if total <= 0.0 {
        return Some(first);
    }
    point_at_distance(points, total * 0.5).map(|(pos, _)| pos)
}

/// Area-weighted centroid of the geometry's vertex ring.
///
/// The shoelace sum is taken relative to the first vertex so large
/// coordinates keep their precision. One vertex yields itself, two yield
/// their midpoint, and a zero-area ring falls back to its last vertex.
pub fn centroid(geometry: &Geometry) -> Option<DVec2> {
    let vertices = geometry.vertices();
    let (&start, rest) = vertices.split_first()?;

    match rest {
        [] => return Some(start),
        [only] => return Some((start + *only) * 0.5),
        _ => {}
    }

    let mut area = 0.0;
    let mut weighted = DVec2::ZERO;
    let mut prev = DVec2::ZERO;
    for &vertex in rest {
        let current = vertex - start;
        let ai = prev.perp_dot(current);
        area += ai;
        weighted += (prev + current) * ai;
        prev = current;
    }

    if area != 0.0 {
        Some(weighted / (3.0 * area) + start)
    } else {
        rest.last().copied()
    }
}

/// Even-odd point-in-polygon test against an open or closed ring.
pub fn point_in_ring(ring: &[DVec2], point: DVec2) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = ring[i];
        let b = ring[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// A point guaranteed to lie inside a polygon.
///
/// Uses the centroid when it is inside the ring, otherwise the midpoint of
/// the widest interior span of a horizontal scanline through the centroid.
/// Non-polygon geometries fall back to their centroid.
pub fn interior_position(geometry: &Geometry) -> Option<DVec2> {
    let center = centroid(geometry)?;
    if geometry.kind() != GeometryKind::Polygon {
        return Some(center);
    }

    let ring = geometry.vertices();
    if ring.len() < 3 {
        return None;
    }
    if point_in_ring(ring, center) {
        return Some(center);
    }

    let y = center.y;
    let mut crossings: Vec<f64> = Vec::new();
    for (i, &a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        if (a.y <= y && b.y > y) || (b.y <= y && a.y > y) {
            let t = (y - a.y) / (b.y - a.y);
            crossings.push(a.x + t * (b.x - a.x));
        }
    }
    crossings.sort_by(|a, b| a.total_cmp(b));

    let mut widest: Option<(f64, f64)> = None;
    for span in crossings.chunks_exact(2) {
        let width = span[1] - span[0];
        if width > 0.0 && widest.map_or(true, |(_, w)| width > w) {
            widest = Some(((span[0] + span[1]) * 0.5, width));
        }
    }

    widest.map(|(x, _)| DVec2::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: DVec2, b: DVec2) -> bool {
        a.distance(b) < 1e-9
    }

    #[test]
    fn test_path_length() {
        let points = [DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0), DVec2::new(10.0, 10.0)];
        assert!((path_length(&points) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_middle_point_bends_at_corner() {
        let points = [DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0), DVec2::new(10.0, 10.0)];
        assert!(close(middle_point(&points).unwrap(), DVec2::new(10.0, 0.0)));

        let points = [DVec2::new(0.0, 0.0), DVec2::new(4.0, 0.0), DVec2::new(4.0, 2.0)];
        assert!(close(middle_point(&points).unwrap(), DVec2::new(3.0, 0.0)));
    }

    #[test]
    fn test_middle_point_degenerate() {
        assert!(middle_point(&[]).is_none());
        let single = [DVec2::new(3.0, 4.0)];
        assert_eq!(middle_point(&single), Some(DVec2::new(3.0, 4.0)));
    }

    #[test]
    fn test_sample_path() {
        let points = [DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0)];
        let (pos, tangent) = point_at_distance(&points, 5.0).unwrap();
        assert!(close(pos, DVec2::new(5.0, 0.0)));
        assert!(tangent.abs() < 1e-9);
    }

    #[test]
    fn test_centroid_square() {
        let square = Geometry::polygon(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]);
        assert!(close(centroid(&square).unwrap(), DVec2::new(2.0, 2.0)));
    }

    #[test]
    fn test_centroid_small_inputs() {
        assert_eq!(centroid(&Geometry::point(1.0, 1.0)), Some(DVec2::new(1.0, 1.0)));
        let seg = Geometry::line_string(&[(0.0, 0.0), (2.0, 2.0)]);
        assert_eq!(centroid(&seg), Some(DVec2::new(1.0, 1.0)));
        let empty = Geometry::new(GeometryKind::Polygon, Vec::new());
        assert!(centroid(&empty).is_none());
    }

    #[test]
    fn test_interior_of_u_shape() {
        // The centroid of a U falls in the notch; the interior point must not.
        let u = Geometry::polygon(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (8.0, 10.0),
            (8.0, 2.0),
            (2.0, 2.0),
            (2.0, 10.0),
            (0.0, 10.0),
        ]);
        let c = centroid(&u).unwrap();
        assert!(!point_in_ring(u.vertices(), c));

        let p = interior_position(&u).unwrap();
        assert!(point_in_ring(u.vertices(), p));
        assert!((p.y - c.y).abs() < 1e-9);
    }

    #[test]
    fn test_interior_degenerate_polygon() {
        let flat = Geometry::polygon(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
        assert!(interior_position(&flat).is_none());
    }
}
