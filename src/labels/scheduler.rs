//! Retry search over placement candidates.
//!
//! The scheduler walks the candidate list at the engine's current position
//! variant. Accepted candidates are consumed; rejected ones stay for the
//! next variant. When a pass over the list ends, the engine is asked for the
//! next variant and the walk restarts from the front. The search ends when
//! the list is drained or the engine has no variants left.
//!
//! Candidates live in an arena with a consumed flag per entry, so the walk is
//! a plain index scan and nothing is erased mid-traversal.

use glam::DVec2;

use crate::geo::{Envelope, Geometry, PixelTransform};
use crate::labels::engine::PlacementEngine;
use crate::labels::selector::CandidateSet;
use crate::labels::types::{Placement, SearchMode, SearchState};
use crate::vector::clip::{clip_geometry, geometry_parts};

/// Fixed candidate storage with a consumed flag per entry.
#[derive(Debug, Clone)]
struct CandidateArena<T> {
    entries: Vec<T>,
    consumed: Vec<bool>,
    remaining: usize,
}

impl<T: Copy> CandidateArena<T> {
    fn new(entries: Vec<T>) -> Self {
        let remaining = entries.len();
        Self {
            consumed: vec![false; remaining],
            entries,
            remaining,
        }
    }

    /// First unconsumed index at or after `from`.
    fn next_live(&self, from: usize) -> Option<usize> {
        (from..self.entries.len()).find(|&i| !self.consumed[i])
    }

    fn get(&self, index: usize) -> T {
        self.entries[index]
    }

    fn consume(&mut self, index: usize) {
        if !self.consumed[index] {
            self.consumed[index] = true;
            self.remaining -= 1;
        }
    }

    fn is_drained(&self) -> bool {
        self.remaining == 0
    }
}

#[derive(Debug, Clone)]
enum Candidates<'a> {
    Line(CandidateArena<&'a Geometry>),
    Point(CandidateArena<DVec2>),
}

/// Drives a placement engine over one feature's candidates.
pub struct PlacementRetryScheduler<'a, E: PlacementEngine> {
    engine: E,
    candidates: Candidates<'a>,
    transform: PixelTransform<'a>,
    clip_box: Option<Envelope>,
    points_on_line: bool,
    cursor: usize,
    state: SearchState,
}

impl<'a, E: PlacementEngine> PlacementRetryScheduler<'a, E> {
    /// Create a scheduler over `candidates`.
    ///
    /// A non-empty search space advances the engine to its first position
    /// variant. An empty one, or an engine without variants, starts
    /// exhausted.
    pub fn new(candidates: CandidateSet<'a>, transform: PixelTransform<'a>, mut engine: E) -> Self {
        let empty = candidates.is_empty();
        let candidates = match candidates.mode {
            SearchMode::Line => Candidates::Line(CandidateArena::new(candidates.geometries)),
            SearchMode::Point => Candidates::Point(CandidateArena::new(candidates.points)),
        };

        let state = if empty || !engine.advance_position() {
            SearchState::Exhausted
        } else {
            SearchState::Scanning
        };

        Self {
            engine,
            candidates,
            transform,
            clip_box: None,
            points_on_line: false,
            cursor: 0,
            state,
        }
    }

    /// Clip line candidates against `clip_box` (feature coordinates) before
    /// offering them to the engine.
    pub fn with_clip_box(mut self, clip_box: Option<Envelope>) -> Self {
        self.clip_box = clip_box;
        self
    }

    /// Passed through to every line attempt.
    pub fn with_points_on_line(mut self, points_on_line: bool) -> Self {
        self.points_on_line = points_on_line;
        self
    }

    pub fn mode(&self) -> SearchMode {
        match self.candidates {
            Candidates::Line(_) => SearchMode::Line,
            Candidates::Point(_) => SearchMode::Point,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Candidates not yet placed.
    pub fn remaining(&self) -> usize {
        match &self.candidates {
            Candidates::Line(arena) => arena.remaining,
            Candidates::Point(arena) => arena.remaining,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Advance to the next line placement. Returns false once exhausted.
    pub fn next_line_placement(&mut self) -> bool {
        if self.state == SearchState::Exhausted {
            return false;
        }
        let Candidates::Line(arena) = &mut self.candidates else {
            return false;
        };

        loop {
            if arena.is_drained() {
                self.state = SearchState::Exhausted;
                return false;
            }

            let Some(index) = arena.next_live(self.cursor) else {
                // Just processed the last geometry. Try next position.
                if !self.engine.advance_position() {
                    log::debug!("line placement exhausted with {} geometries unplaced", arena.remaining);
                    self.state = SearchState::Exhausted;
                    return false;
                }
                self.cursor = 0;
                self.state = SearchState::Scanning;
                continue;
            };

            self.cursor = index + 1;
            let path = line_path(arena.get(index), self.clip_box, &self.transform);
            if !path.is_empty() && self.engine.attempt_line(&path, self.points_on_line) {
                arena.consume(index);
                self.state = SearchState::Found;
                return true;
            }
            // No placement for this geometry. Keep it for the next position.
            self.state = SearchState::Scanning;
        }
    }

    /// Advance to the next point placement. Returns false once exhausted.
    pub fn next_point_placement(&mut self) -> bool {
        if self.state == SearchState::Exhausted {
            return false;
        }
        let Candidates::Point(arena) = &mut self.candidates else {
            return false;
        };

        loop {
            if arena.is_drained() {
                self.state = SearchState::Exhausted;
                return false;
            }

            let Some(index) = arena.next_live(self.cursor) else {
                // Just processed the last point. Try next position.
                if !self.engine.advance_position() {
                    log::debug!("point placement exhausted with {} anchors unplaced", arena.remaining);
                    self.state = SearchState::Exhausted;
                    return false;
                }
                self.cursor = 0;
                self.state = SearchState::Scanning;
                continue;
            };

            self.cursor = index + 1;
            if self.engine.attempt_point(arena.get(index)) {
                arena.consume(index);
                self.state = SearchState::Found;
                return true;
            }
            self.state = SearchState::Scanning;
        }
    }

    /// Produce at most one more placement using the active search mode.
    pub fn next_placement(&mut self) -> bool {
        match self.mode() {
            SearchMode::Line => self.next_line_placement(),
            SearchMode::Point => self.next_point_placement(),
        }
    }

    /// Run the search to exhaustion and return every accepted placement.
    ///
    /// Once exhausted this returns the same placements without touching the
    /// engine again.
    pub fn get(&mut self) -> &[Placement<E::Payload>] {
        while self.next_placement() {}
        self.engine.placements()
    }
}

/// Pixel-space path for a line candidate, clipped first when requested.
fn line_path(geom: &Geometry, clip_box: Option<Envelope>, transform: &PixelTransform<'_>) -> Vec<Vec<DVec2>> {
    let parts = match clip_box {
        Some(clip_box) => clip_geometry(geom, &clip_box),
        None => geometry_parts(geom),
    };

    parts
        .iter()
        .map(|part| transform.path_to_pixel(part))
        .filter(|part| part.len() >= 2)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{IdentityProjection, ViewTransform};

    /// Engine that accepts a scripted set of (position, anchor index) pairs.
    struct ScriptedEngine {
        position: Option<usize>,
        positions: usize,
        accept: Vec<(usize, DVec2)>,
        placements: Vec<Placement<()>>,
        calls: usize,
    }

    impl ScriptedEngine {
        fn new(positions: usize, accept: Vec<(usize, DVec2)>) -> Self {
            Self {
                position: None,
                positions,
                accept,
                placements: Vec::new(),
                calls: 0,
            }
        }
    }

    impl PlacementEngine for ScriptedEngine {
        type Payload = ();

        fn advance_position(&mut self) -> bool {
            self.calls += 1;
            let next = self.position.map_or(0, |p| p + 1);
            if next < self.positions {
                self.position = Some(next);
                true
            } else {
                false
            }
        }

        fn attempt_line(&mut self, path: &[Vec<DVec2>], _points_on_line: bool) -> bool {
            self.attempt_point(path[0][0])
        }

        fn attempt_point(&mut self, anchor: DVec2) -> bool {
            self.calls += 1;
            let position = self.position.unwrap_or(0);
            if self.accept.contains(&(position, anchor)) {
                self.placements.push(Placement {
                    anchor,
                    angle: 0.0,
                    position,
                    bounds: Envelope::new(anchor, anchor),
                    payload: (),
                });
                true
            } else {
                false
            }
        }

        fn placements(&self) -> &[Placement<()>] {
            &self.placements
        }
    }

    fn points(coords: &[(f64, f64)]) -> CandidateSet<'static> {
        CandidateSet {
            mode: SearchMode::Point,
            geometries: Vec::new(),
            points: coords.iter().map(|&(x, y)| DVec2::new(x, y)).collect(),
        }
    }

    #[test]
    fn test_arena_skips_consumed() {
        let mut arena = CandidateArena::new(vec![1, 2, 3]);
        arena.consume(1);
        assert_eq!(arena.next_live(1), Some(2));
        arena.consume(1);
        assert_eq!(arena.remaining, 2);
    }

    #[test]
    fn test_retry_at_next_position() {
        let proj = IdentityProjection;
        let view = ViewTransform::new(10, 10, Envelope::from_coords(0.0, 0.0, 10.0, 10.0));
        let a = DVec2::new(1.0, 1.0);
        let b = DVec2::new(2.0, 2.0);
        let engine = ScriptedEngine::new(3, vec![(0, a), (1, b)]);
        let mut scheduler =
            PlacementRetryScheduler::new(points(&[(1.0, 1.0), (2.0, 2.0)]), PixelTransform::new(&proj, &view), engine);

        assert!(scheduler.next_point_placement());
        assert_eq!(scheduler.state(), SearchState::Found);
        assert!(scheduler.next_point_placement());
        assert!(!scheduler.next_point_placement());
        assert_eq!(scheduler.state(), SearchState::Exhausted);

        let placed = scheduler.get();
        assert_eq!(placed.len(), 2);
        assert_eq!((placed[0].anchor, placed[0].position), (a, 0));
        assert_eq!((placed[1].anchor, placed[1].position), (b, 1));
    }

    #[test]
    fn test_wrong_mode_is_noop() {
        let proj = IdentityProjection;
        let view = ViewTransform::new(10, 10, Envelope::from_coords(0.0, 0.0, 10.0, 10.0));
        let engine = ScriptedEngine::new(1, Vec::new());
        let mut scheduler =
            PlacementRetryScheduler::new(points(&[(1.0, 1.0)]), PixelTransform::new(&proj, &view), engine);
        assert!(!scheduler.next_line_placement());
        assert_eq!(scheduler.state(), SearchState::Scanning);
    }

    #[test]
    fn test_empty_never_touches_engine() {
        let proj = IdentityProjection;
        let view = ViewTransform::new(10, 10, Envelope::from_coords(0.0, 0.0, 10.0, 10.0));
        let engine = ScriptedEngine::new(3, Vec::new());
        let mut scheduler = PlacementRetryScheduler::new(points(&[]), PixelTransform::new(&proj, &view), engine);
        assert_eq!(scheduler.state(), SearchState::Exhausted);
        assert!(scheduler.get().is_empty());
        assert_eq!(scheduler.engine().calls, 0);
    }
}
