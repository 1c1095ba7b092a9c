//! Collision detection for placed labels.
//!
//! The placement engine consults one detector per rendering pass and records
//! every accepted box in it. A detector is single-writer: it is borrowed
//! mutably by exactly one engine at a time.

use glam::DVec2;

use crate::geo::Envelope;

/// Records placed label boxes and answers overlap queries.
pub trait CollisionDetector {
    /// True if `bounds` can be placed without overlapping a recorded box.
    fn has_placement(&self, bounds: &Envelope) -> bool;

    /// Record a box unconditionally.
    fn insert(&mut self, bounds: Envelope);

    /// Forget every recorded box.
    fn clear(&mut self);

    /// Test and record in one step. Returns true if the box was recorded.
    fn try_insert(&mut self, bounds: Envelope) -> bool {
        if self.has_placement(&bounds) {
            self.insert(bounds);
            true
        } else {
            false
        }
    }
}

/// Grid-based collision detection to prevent label overlap.
/// Uses a simple 2D grid where each cell tracks occupied rectangles.
pub struct CollisionGrid {
    width: f64,
    height: f64,
    cell_size: f64,
    cols: usize,
    rows: usize,
    /// Each cell contains the occupied rectangles that touch it.
    cells: Vec<Vec<Envelope>>,
    count: usize,
}

impl CollisionGrid {
    /// Create a new collision grid.
    ///
    /// # Arguments
    /// * `width` - Raster width in pixels
    /// * `height` - Raster height in pixels
    /// * `cell_size` - Size of each grid cell in pixels (e.g., 10)
    pub fn new(width: u32, height: u32, cell_size: u32) -> Self {
        let cell_size = cell_size.max(1);
        let cols = width.div_ceil(cell_size).max(1) as usize;
        let rows = height.div_ceil(cell_size).max(1) as usize;

        Self {
            width: width as f64,
            height: height as f64,
            cell_size: cell_size as f64,
            cols,
            rows,
            cells: vec![Vec::new(); cols * rows],
            count: 0,
        }
    }

    /// Number of recorded boxes.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Clamp to the raster; `None` when completely off-screen.
    fn clamp(&self, bounds: &Envelope) -> Option<Envelope> {
        let min = bounds.min.max(DVec2::ZERO);
        let max = bounds.max.min(DVec2::new(self.width, self.height));
        if min.x >= max.x || min.y >= max.y {
            return None;
        }
        Some(Envelope { min, max })
    }

    /// Cell index ranges (cols, rows) covered by a clamped box.
    fn cell_range(&self, bounds: &Envelope) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        let col0 = ((bounds.min.x / self.cell_size).floor() as usize).min(self.cols - 1);
        let col1 = ((bounds.max.x / self.cell_size).ceil() as usize).min(self.cols);
        let row0 = ((bounds.min.y / self.cell_size).floor() as usize).min(self.rows - 1);
        let row1 = ((bounds.max.y / self.cell_size).ceil() as usize).min(self.rows);
        (col0..col1.max(col0 + 1), row0..row1.max(row0 + 1))
    }
}

impl CollisionDetector for CollisionGrid {
    fn has_placement(&self, bounds: &Envelope) -> bool {
        // Off-screen counts as collision
        let Some(clamped) = self.clamp(bounds) else {
            return false;
        };

        let (cols, rows) = self.cell_range(&clamped);
        for row in rows {
            for col in cols.clone() {
                let idx = row * self.cols + col;
                if self.cells[idx].iter().any(|existing| clamped.intersects(existing)) {
                    return false;
                }
            }
        }
        true
    }

    fn insert(&mut self, bounds: Envelope) {
        let Some(clamped) = self.clamp(&bounds) else {
            return;
        };

        let (cols, rows) = self.cell_range(&clamped);
        for row in rows {
            for col in cols.clone() {
                let idx = row * self.cols + col;
                self.cells[idx].push(clamped);
            }
        }
        self.count += 1;
    }

    fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
        self.count = 0;
    }
}
