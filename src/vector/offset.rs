// src/vector/offset.rs
// Parallel offset of pixel-space polylines with mitered joins
// RELEVANT FILES: src/vector/pipeline.rs

use glam::DVec2;

/// Miter length limit as a multiple of the offset distance.
const MITER_LIMIT: f64 = 4.0;

/// Offset a polyline sideways by `distance` pixels.
///
/// Positive distances move the line to the left of its direction of travel
/// as seen on screen (y down). Interior vertices are joined with a miter
/// capped at `MITER_LIMIT * |distance|`. Repeated vertices are collapsed.
pub fn offset_polyline(path: &[DVec2], distance: f64) -> Vec<DVec2> {
    let mut points: Vec<DVec2> = Vec::with_capacity(path.len());
    for &p in path {
        if points.last() != Some(&p) {
            points.push(p);
        }
    }
    if points.len() < 2 || distance == 0.0 {
        return points;
    }

    let normals: Vec<DVec2> = points
        .windows(2)
        .map(|seg| left_normal(seg[1] - seg[0]))
        .collect();

    let mut out = Vec::with_capacity(points.len());
    for (i, &p) in points.iter().enumerate() {
        if i == 0 {
            out.push(p + normals[0] * distance);
            continue;
        }
        if i == points.len() - 1 {
            out.push(p + normals[i - 1] * distance);
            continue;
        }

        let n1 = normals[i - 1];
        let n2 = normals[i];
        let join = (n1 + n2).normalize_or_zero();
        if join == DVec2::ZERO {
            // Full reversal
            out.push(p + n1 * distance);
            continue;
        }

        let miter_dot = join.dot(n1);
        let miter_length = if miter_dot.abs() > 0.01 {
            distance / miter_dot
        } else {
            distance
        };
        let limit = distance.abs() * MITER_LIMIT;
        out.push(p + join * miter_length.clamp(-limit, limit));
    }

    out
}

/// Unit normal pointing left of `direction` in a y-down frame.
fn left_normal(direction: DVec2) -> DVec2 {
    -direction.normalize_or_zero().perp()
}
