// src/vector/simplify.rs
// Polyline vertex reduction: radial distance and Douglas-Peucker
// RELEVANT FILES: src/vector/pipeline.rs, src/style/types.rs

use glam::DVec2;

use crate::style::SimplifyAlgorithm;

/// Simplify `points` with `algorithm`. Endpoints are always kept.
pub fn simplify(points: &[DVec2], tolerance: f64, algorithm: SimplifyAlgorithm) -> Vec<DVec2> {
    match algorithm {
        SimplifyAlgorithm::RadialDistance => radial_distance(points, tolerance),
        SimplifyAlgorithm::DouglasPeucker => douglas_peucker(points, tolerance),
    }
}

/// Drop every vertex closer than `tolerance` to the last kept one.
pub fn radial_distance(points: &[DVec2], tolerance: f64) -> Vec<DVec2> {
    if points.len() < 3 || tolerance <= 0.0 {
        return points.to_vec();
    }

    let tolerance_sq = tolerance * tolerance;
    let last = points.len() - 1;
    let mut out = vec![points[0]];
    for &p in &points[1..last] {
        if let Some(&prev) = out.last() {
            if p.distance_squared(prev) > tolerance_sq {
                out.push(p);
            }
        }
    }
    out.push(points[last]);
    out
}

/// Douglas-Peucker reduction with an explicit work stack.
pub fn douglas_peucker(points: &[DVec2], tolerance: f64) -> Vec<DVec2> {
    if points.len() < 3 || tolerance <= 0.0 {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    let mut stack = vec![(0usize, points.len() - 1)];
    while let Some((first, last)) = stack.pop() {
        if last <= first + 1 {
            continue;
        }
        let mut max_dist = 0.0;
        let mut index = first;
        for i in first + 1..last {
            let d = segment_distance(points[i], points[first], points[last]);
            if d > max_dist {
                max_dist = d;
                index = i;
            }
        }
        if max_dist > tolerance {
            keep[index] = true;
            stack.push((first, index));
            stack.push((index, last));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

/// Distance from `p` to the segment `a`..`b`.
fn segment_distance(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peak() -> Vec<DVec2> {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 2.1),
            DVec2::new(4.0, 4.0),
            DVec2::new(6.0, 2.0),
            DVec2::new(8.0, 0.0),
        ]
    }

    #[test]
    fn test_radial_drops_close_vertices() {
        let points = [
            DVec2::new(0.0, 0.0),
            DVec2::new(0.5, 0.0),
            DVec2::new(3.0, 0.0),
            DVec2::new(3.2, 0.0),
        ];
        let out = radial_distance(&points, 1.0);
        assert_eq!(out, vec![DVec2::new(0.0, 0.0), DVec2::new(3.0, 0.0), DVec2::new(3.2, 0.0)]);
    }

    #[test]
    fn test_douglas_peucker_keeps_peak() {
        let out = douglas_peucker(&peak(), 0.5);
        assert_eq!(out, vec![DVec2::new(0.0, 0.0), DVec2::new(4.0, 4.0), DVec2::new(8.0, 0.0)]);
    }

    #[test]
    fn test_zero_tolerance_is_identity() {
        assert_eq!(simplify(&peak(), 0.0, SimplifyAlgorithm::DouglasPeucker), peak());
    }
}
