// src/vector/smooth.rs
// Corner rounding: each segment becomes a Bezier curve whose control points
// follow the neighbouring vertices, then lyon flattens the curves
// RELEVANT FILES: src/vector/pipeline.rs

use glam::DVec2;
use lyon_geom::{point, CubicBezierSegment, LineSegment, Point, QuadraticBezierSegment};

/// Maximum distance, in pixels, between a curve and its flattened polyline.
const FLATTEN_TOLERANCE: f64 = 0.1;

/// Smooth a pixel-space polyline.
///
/// `factor` is clamped to `[0, 1]`; 0 returns the input. A path whose first
/// and last vertices coincide is smoothed as a closed ring. Every original
/// vertex stays on the output path.
pub fn smooth_polyline(path: &[DVec2], factor: f64) -> Vec<DVec2> {
    let factor = factor.clamp(0.0, 1.0);
    let mut points: Vec<DVec2> = Vec::with_capacity(path.len());
    for &p in path {
        if points.last() != Some(&p) {
            points.push(p);
        }
    }
    if factor == 0.0 || points.len() < 3 {
        return points;
    }

    let closed = points.len() > 3 && points.first() == points.last();
    if closed {
        points.pop();
    }
    let smooth_value = factor * 0.5;
    let n = points.len();
    let segments = if closed { n } else { n - 1 };

    let mut out = vec![points[0]];
    for i in 0..segments {
        let v1 = points[i];
        let v2 = points[(i + 1) % n];
        let v0 = (closed || i > 0).then(|| points[(i + n - 1) % n]);
        let v3 = (closed || i + 2 < n).then(|| points[(i + 2) % n]);

        let ctrl1 = v0.map(|v0| leading_control(v0, v1, v2, smooth_value));
        let ctrl2 = v3.map(|v3| trailing_control(v1, v2, v3, smooth_value));

        match (ctrl1, ctrl2) {
            (Some(c1), Some(c2)) => flatten_cubic(v1, c1, c2, v2, &mut out),
            (Some(c), None) | (None, Some(c)) => flatten_quadratic(v1, c, v2, &mut out),
            (None, None) => out.push(v2),
        }
    }

    out
}

/// Control point leaving `v1` towards `v2`.
fn leading_control(v0: DVec2, v1: DVec2, v2: DVec2, smooth_value: f64) -> DVec2 {
    let d01 = v0.distance(v1);
    let d12 = v1.distance(v2);
    let k = d01 / (d01 + d12);
    let mid = v0 + (v2 - v0) * k;
    v1 + (v2 - mid) * smooth_value
}

/// Control point arriving at `v2` from `v1`.
fn trailing_control(v1: DVec2, v2: DVec2, v3: DVec2, smooth_value: f64) -> DVec2 {
    let d12 = v1.distance(v2);
    let d23 = v2.distance(v3);
    let k = d12 / (d12 + d23);
    let mid = v1 + (v3 - v1) * k;
    v2 + (v1 - mid) * smooth_value
}

fn to_point(p: DVec2) -> Point<f64> {
    point(p.x, p.y)
}

/// Make the flattened run starting at `start` end exactly on `to`.
fn end_on(out: &mut Vec<DVec2>, start: usize, to: DVec2) {
    if out.len() == start {
        out.push(to);
    } else if let Some(last) = out.last_mut() {
        *last = to;
    }
}

fn flatten_cubic(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2, out: &mut Vec<DVec2>) {
    let seg = CubicBezierSegment {
        from: to_point(p0),
        ctrl1: to_point(p1),
        ctrl2: to_point(p2),
        to: to_point(p3),
    };
    let start = out.len();
    seg.for_each_flattened(FLATTEN_TOLERANCE, &mut |ls: &LineSegment<f64>| {
        out.push(DVec2::new(ls.to.x, ls.to.y));
    });
    end_on(out, start, p3);
}

fn flatten_quadratic(p0: DVec2, p1: DVec2, p2: DVec2, out: &mut Vec<DVec2>) {
    let seg = QuadraticBezierSegment {
        from: to_point(p0),
        ctrl: to_point(p1),
        to: to_point(p2),
    };
    let start = out.len();
    seg.for_each_flattened(FLATTEN_TOLERANCE, &mut |ls: &LineSegment<f64>| {
        out.push(DVec2::new(ls.to.x, ls.to.y));
    });
    end_on(out, start, p2);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner() -> Vec<DVec2> {
        vec![DVec2::new(0.0, 0.0), DVec2::new(50.0, 0.0), DVec2::new(50.0, 50.0)]
    }

    #[test]
    fn test_zero_factor_unchanged() {
        assert_eq!(smooth_polyline(&corner(), 0.0), corner());
    }

    #[test]
    fn test_vertices_kept_and_curve_added() {
        let out = smooth_polyline(&corner(), 1.0);
        assert!(out.len() > 3);
        assert_eq!(out[0], DVec2::new(0.0, 0.0));
        assert_eq!(*out.last().unwrap(), DVec2::new(50.0, 50.0));
        assert!(out.iter().any(|p| *p == DVec2::new(50.0, 0.0)));
    }

    #[test]
    fn test_straight_line_stays_straight() {
        let line = vec![DVec2::new(0.0, 5.0), DVec2::new(10.0, 5.0), DVec2::new(30.0, 5.0)];
        let out = smooth_polyline(&line, 0.7);
        assert!(out.iter().all(|p| (p.y - 5.0).abs() < 1e-9));
    }

    #[test]
    fn test_flattened_within_tolerance_of_hull() {
        // Every flattened point lies inside the control hull of the corner
        let out = smooth_polyline(&corner(), 1.0);
        assert!(out.iter().all(|p| p.x >= -1e-9 && p.x <= 50.0 + 12.5 && p.y >= -12.5 && p.y <= 50.0 + 1e-9));
    }

    #[test]
    fn test_closed_ring_stays_closed() {
        let ring = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(20.0, 0.0),
            DVec2::new(20.0, 20.0),
            DVec2::new(0.0, 20.0),
            DVec2::new(0.0, 0.0),
        ];
        let out = smooth_polyline(&ring, 1.0);
        assert_eq!(out.first(), out.last());
        assert!(out.len() > ring.len());
    }
}
