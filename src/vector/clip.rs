// src/vector/clip.rs
// Polyline clipping against an axis-aligned rectangle (Liang-Barsky per segment)
// RELEVANT FILES: src/vector/pipeline.rs, src/labels/scheduler.rs

use glam::DVec2;

use crate::geo::{Envelope, Geometry, GeometryKind};

/// Vertex sequence of a geometry as a single polyline.
///
/// Polygon rings are closed by repeating the first vertex when needed.
pub fn geometry_parts(geom: &Geometry) -> Vec<Vec<DVec2>> {
    if geom.is_empty() {
        return Vec::new();
    }
    let mut path = geom.vertices().to_vec();
    if geom.kind() == GeometryKind::Polygon && path.len() > 2 && path.first() != path.last() {
        path.push(path[0]);
    }
    vec![path]
}

/// Clip a geometry's outline to `bbox`, returning the visible parts.
pub fn clip_geometry(geom: &Geometry, bbox: &Envelope) -> Vec<Vec<DVec2>> {
    geometry_parts(geom)
        .iter()
        .flat_map(|path| clip_polyline(path, bbox))
        .collect()
}

/// Clip an open polyline to `bbox`.
///
/// Each maximal run of visible segments becomes one part. Parts with fewer
/// than two vertices are dropped. Points on the boundary count as inside.
pub fn clip_polyline(points: &[DVec2], bbox: &Envelope) -> Vec<Vec<DVec2>> {
    let mut parts = Vec::new();
    let mut current: Vec<DVec2> = Vec::new();

    fn flush(parts: &mut Vec<Vec<DVec2>>, current: &mut Vec<DVec2>) {
        if current.len() >= 2 {
            parts.push(std::mem::take(current));
        } else {
            current.clear();
        }
    }

    if points.len() == 1 {
        if bbox.contains_point(points[0]) {
            parts.push(vec![points[0]]);
        }
        return parts;
    }

    for seg in points.windows(2) {
        let (a, b) = (seg[0], seg[1]);
        if a == b {
            continue;
        }
        match clip_segment(a, b, bbox) {
            Some((start, end, t1)) => {
                if current.last() != Some(&start) {
                    flush(&mut parts, &mut current);
                    current.push(start);
                }
                current.push(end);
                // Segment leaves the box
                if t1 < 1.0 {
                    flush(&mut parts, &mut current);
                }
            }
            None => flush(&mut parts, &mut current),
        }
    }
    flush(&mut parts, &mut current);

    parts
}

/// Visible part of segment `a`..`b` and its exit parameter.
fn clip_segment(a: DVec2, b: DVec2, bbox: &Envelope) -> Option<(DVec2, DVec2, f64)> {
    let d = b - a;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    let checks = [
        (-d.x, a.x - bbox.min.x),
        (d.x, bbox.max.x - a.x),
        (-d.y, a.y - bbox.min.y),
        (d.y, bbox.max.y - a.y),
    ];

    for (p, q) in checks {
        if p == 0.0 {
            // Parallel to this edge
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let start = if t0 > 0.0 { a + d * t0 } else { a };
    let end = if t1 < 1.0 { a + d * t1 } else { b };
    Some((start, end, t1))
}
