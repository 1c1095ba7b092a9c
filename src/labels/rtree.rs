//! R-tree based collision detection for labels.
//!
//! Provides faster collision detection for many labels compared to grid-based approach.

use rstar::{RTree, RTreeObject, AABB};

use crate::geo::Envelope;
use crate::labels::collision::CollisionDetector;

/// A placed label box for R-tree storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelBounds {
    /// Insertion order, for reference.
    pub id: u64,
    /// Bounding box in pixels.
    pub bounds: Envelope,
}

impl RTreeObject for LabelBounds {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        to_aabb(&self.bounds)
    }
}

fn to_aabb(bounds: &Envelope) -> AABB<[f64; 2]> {
    AABB::from_corners(bounds.min.to_array(), bounds.max.to_array())
}

/// R-tree based collision detection for labels.
pub struct LabelRTree {
    tree: RTree<LabelBounds>,
    extent: Envelope,
    next_id: u64,
}

impl LabelRTree {
    /// Create a new R-tree for the given raster dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            tree: RTree::new(),
            extent: Envelope::from_coords(0.0, 0.0, width as f64, height as f64),
            next_id: 0,
        }
    }

    /// Clamp to the raster; `None` when completely off-screen.
    fn clamp(&self, bounds: &Envelope) -> Option<Envelope> {
        let min = bounds.min.max(self.extent.min);
        let max = bounds.max.min(self.extent.max);
        if min.x >= max.x || min.y >= max.y {
            return None;
        }
        Some(Envelope { min, max })
    }

    /// Get all recorded boxes that intersect with the given rectangle.
    pub fn query_intersecting(&self, bounds: &Envelope) -> Vec<LabelBounds> {
        self.tree
            .locate_in_envelope_intersecting(&to_aabb(bounds))
            .copied()
            .collect()
    }

    /// Get the number of stored bounds.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Update raster dimensions. Recorded boxes are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.extent = Envelope::from_coords(0.0, 0.0, width as f64, height as f64);
        self.clear();
    }
}

impl CollisionDetector for LabelRTree {
    fn has_placement(&self, bounds: &Envelope) -> bool {
        // Off-screen counts as collision
        let Some(clamped) = self.clamp(bounds) else {
            return false;
        };

        !self
            .tree
            .locate_in_envelope_intersecting(&to_aabb(&clamped))
            .any(|existing| clamped.intersects(&existing.bounds))
    }

    fn insert(&mut self, bounds: Envelope) {
        if let Some(clamped) = self.clamp(&bounds) {
            self.tree.insert(LabelBounds {
                id: self.next_id,
                bounds: clamped,
            });
            self.next_id += 1;
        }
    }

    fn clear(&mut self) {
        self.tree = RTree::new();
        self.next_id = 0;
    }
}
