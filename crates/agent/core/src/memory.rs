//! Level-scoped memory of where the agent has been and what it has seen.
//!
//! Both maps live for one dungeon level. Visit counts bias the searches away
//! from well-trodden tiles; the seen map drives frontier exploration. Neither
//! is ever partially cleared: [`VisitationMemory::reset_for_new_level`] wipes
//! both at once.
use std::collections::{HashMap, HashSet};

use crate::grid::{MapDimensions, Position};

#[derive(Clone, Debug, Default)]
pub struct VisitationMemory {
    visits: HashMap<Position, u32>,
    seen: HashSet<Position>,
}

impl VisitationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the visit count of `position`.
    pub fn record_visit(&mut self, position: Position) {
        *self.visits.entry(position).or_insert(0) += 1;
    }

    /// Number of recorded visits; zero for tiles never stood on.
    pub fn visit_count(&self, position: Position) -> u32 {
        self.visits.get(&position).copied().unwrap_or(0)
    }

    /// True when the tile was visited more than `threshold` times.
    pub fn is_revisit_penalized(&self, position: Position, threshold: u32) -> bool {
        self.visit_count(position) > threshold
    }

    /// Marks every cell of the square of `radius` around `center` as seen,
    /// clipped to the grid.
    pub fn mark_seen(&mut self, center: Position, radius: u32, dimensions: MapDimensions) {
        let radius = radius as i32;
        let min_x = (center.x - radius).max(0);
        let min_y = (center.y - radius).max(0);
        let max_x = (center.x + radius).min(dimensions.width as i32 - 1);
        let max_y = (center.y + radius).min(dimensions.height as i32 - 1);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                self.seen.insert(Position::new(x, y));
            }
        }
    }

    pub fn is_seen(&self, position: Position) -> bool {
        self.seen.contains(&position)
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Distinct tiles stood on during this level.
    pub fn visited_tiles(&self) -> usize {
        self.visits.len()
    }

    /// Clears visit counts and the seen map.
    pub fn reset_for_new_level(&mut self) {
        self.visits.clear();
        self.seen.clear();
    }
}
