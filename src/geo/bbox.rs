//! Axis-aligned envelopes in double precision.

use glam::{DAffine2, DVec2};

/// Axis-aligned rectangle used for geometry extents, clip boxes and label bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub min: DVec2,
    pub max: DVec2,
}

impl Envelope {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_coords(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(DVec2::new(x0, y0), DVec2::new(x1, y1))
    }

    /// Envelope centred on `center` with the given full width and height.
    pub fn centered(center: DVec2, width: f64, height: f64) -> Self {
        let half = DVec2::new(width * 0.5, height * 0.5);
        Self::new(center - half, center + half)
    }

    pub fn from_points(points: &[DVec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;

        let mut min = *first;
        let mut max = *first;
        for &point in rest {
            min = min.min(point);
            max = max.max(point);
        }

        Some(Self { min, max })
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Corners in counter-clockwise order starting at `min`.
    pub fn corners(&self) -> [DVec2; 4] {
        [
            self.min,
            DVec2::new(self.max.x, self.min.y),
            self.max,
            DVec2::new(self.min.x, self.max.y),
        ]
    }

    /// Grow the envelope by `padding` on every side.
    pub fn pad(&self, padding: f64) -> Self {
        let pad = DVec2::splat(padding);
        Self::new(self.min - pad, self.max + pad)
    }

    pub fn translate(&self, offset: DVec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    pub fn expand_to_include(&mut self, point: DVec2) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn union(&self, other: &Envelope) -> Envelope {
        Envelope {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn contains_point(&self, point: DVec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Strict overlap test: touching edges do not intersect.
    pub fn intersects(&self, other: &Envelope) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Bounding box of the four corners after an affine transform.
    pub fn transformed(&self, transform: &DAffine2) -> Envelope {
        let corners = self.corners().map(|c| transform.transform_point2(c));
        let mut out = Envelope {
            min: corners[0],
            max: corners[0],
        };
        for corner in &corners[1..] {
            out.expand_to_include(*corner);
        }
        out
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.min.x, self.min.y, self.max.x, self.max.y]
    }
}
