//! Placement engines.
//!
//! A [`PlacementEngine`] owns text layout and collision testing. The
//! scheduler only asks it to try candidates and to move on to the next
//! position variant. [`BoxPlacementEngine`] is a reference engine that lays
//! every label out as a fixed-size box per position variant.

use glam::{DAffine2, DVec2};

use crate::geo::algorithms::{path_length, point_at_distance};
use crate::geo::Envelope;
use crate::labels::collision::CollisionDetector;
use crate::labels::marker::ShieldMarker;
use crate::labels::types::Placement;

/// Lays out labels and records accepted ones in a collision detector.
pub trait PlacementEngine {
    /// Engine-specific data attached to each placement.
    type Payload;

    /// Move to the next position variant. Returns false when none remain.
    /// The first call selects the first variant.
    fn advance_position(&mut self) -> bool;

    /// Try to place a label along a pixel-space path made of one or more parts.
    fn attempt_line(&mut self, path: &[Vec<DVec2>], points_on_line: bool) -> bool;

    /// Try to place a label at a pixel-space anchor.
    fn attempt_point(&mut self, anchor: DVec2) -> bool;

    /// Every placement accepted so far, in acceptance order.
    fn placements(&self) -> &[Placement<Self::Payload>];

    /// Attach a shield marker that travels with every subsequent label.
    fn set_marker(&mut self, _marker: ShieldMarker) {}

    /// Offset, in pixels, applied to every subsequent label anchor.
    fn set_displacement(&mut self, _displacement: DVec2) {}
}

/// Label box size for one position variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelBox {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl LabelBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Reference engine placing fixed-size boxes, one size per position variant.
pub struct BoxPlacementEngine<'d, D: CollisionDetector + ?Sized> {
    detector: &'d mut D,
    variants: Vec<LabelBox>,
    position: Option<usize>,
    displacement: DVec2,
    marker: Option<ShieldMarker>,
    placements: Vec<Placement<LabelBox>>,
}

impl<'d, D: CollisionDetector + ?Sized> BoxPlacementEngine<'d, D> {
    /// Create an engine trying `variants` in order (e.g. decreasing font sizes).
    pub fn new(detector: &'d mut D, variants: Vec<LabelBox>) -> Self {
        Self {
            detector,
            variants,
            position: None,
            displacement: DVec2::ZERO,
            marker: None,
            placements: Vec::new(),
        }
    }

    /// Offset applied to every label anchor, in pixels.
    pub fn with_displacement(mut self, displacement: DVec2) -> Self {
        self.displacement = displacement;
        self
    }

    /// Index of the active position variant.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn marker(&self) -> Option<&ShieldMarker> {
        self.marker.as_ref()
    }

    pub fn detector(&self) -> &D {
        &*self.detector
    }

    fn current(&self) -> Option<(usize, LabelBox)> {
        let position = self.position?;
        self.variants.get(position).map(|v| (position, *v))
    }

    /// Label box plus the marker box, if a shield marker is attached.
    fn with_marker_bounds(&self, anchor: DVec2, label: Envelope) -> Envelope {
        match &self.marker {
            Some(marker) => {
                let mut center = anchor + marker.displacement;
                if !marker.unlock_image {
                    center += self.displacement;
                }
                label.union(&marker.bounds.translate(center))
            }
            None => label,
        }
    }

    fn try_record(&mut self, anchor: DVec2, angle: f64, bounds: Envelope, position: usize, label: LabelBox) -> bool {
        if !self.detector.try_insert(bounds) {
            return false;
        }
        self.placements.push(Placement {
            anchor,
            angle,
            position,
            bounds,
            payload: label,
        });
        true
    }
}

impl<D: CollisionDetector + ?Sized> PlacementEngine for BoxPlacementEngine<'_, D> {
    type Payload = LabelBox;

    fn advance_position(&mut self) -> bool {
        let next = self.position.map_or(0, |p| p + 1);
        if next < self.variants.len() {
            self.position = Some(next);
            true
        } else {
            false
        }
    }

    fn attempt_line(&mut self, path: &[Vec<DVec2>], points_on_line: bool) -> bool {
        let Some((position, label)) = self.current() else {
            return false;
        };

        // Longest part carries the label
        let Some((part, length)) = path
            .iter()
            .filter(|part| part.len() >= 2)
            .map(|part| (part, path_length(part)))
            .fold(None, |best: Option<(&Vec<DVec2>, f64)>, (part, length)| match best {
                Some((_, best_len)) if best_len >= length => best,
                _ => Some((part, length)),
            })
        else {
            return false;
        };

        if !points_on_line && length < label.width {
            return false;
        }

        let Some((mid, tangent)) = point_at_distance(part, length * 0.5) else {
            return false;
        };

        // Shields stay upright at the midpoint; text follows the line.
        let angle = if points_on_line { 0.0 } else { upright(tangent) };
        let anchor = mid + self.displacement;
        let box_transform = DAffine2::from_angle_translation(angle, anchor);
        let label_bounds = Envelope::centered(DVec2::ZERO, label.width, label.height).transformed(&box_transform);
        let bounds = self.with_marker_bounds(mid, label_bounds);

        self.try_record(anchor, angle, bounds, position, label)
    }

    fn attempt_point(&mut self, anchor: DVec2) -> bool {
        let Some((position, label)) = self.current() else {
            return false;
        };

        let center = anchor + self.displacement;
        let label_bounds = Envelope::centered(center, label.width, label.height);
        let bounds = self.with_marker_bounds(anchor, label_bounds);

        self.try_record(center, 0.0, bounds, position, label)
    }

    fn placements(&self) -> &[Placement<LabelBox>] {
        &self.placements
    }

    fn set_marker(&mut self, marker: ShieldMarker) {
        self.marker = Some(marker);
    }

    fn set_displacement(&mut self, displacement: DVec2) {
        self.displacement = displacement;
    }
}

/// Flip text if it would be upside down.
fn upright(angle: f64) -> f64 {
    use std::f64::consts::{FRAC_PI_2, PI};
    if angle > FRAC_PI_2 {
        angle - PI
    } else if angle < -FRAC_PI_2 {
        angle + PI
    } else {
        angle
    }
}
