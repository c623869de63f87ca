//! Fallback targeting toward rarely visited tiles.
use crate::grid::Position;
use crate::search::{SearchEngine, Target};

/// Ranks every walkable tile by visit count and picks the first reachable one.
#[derive(Clone, Copy, Debug)]
pub struct LeastVisitedLocator<'a> {
    engine: SearchEngine<'a>,
    ceiling: u32,
}

impl<'a> LeastVisitedLocator<'a> {
    /// Tiles visited `ceiling` times or more are never returned.
    pub fn new(engine: SearchEngine<'a>, ceiling: u32) -> Self {
        Self { engine, ceiling }
    }

    /// Least-visited tile other than `position` with a non-empty path to it.
    ///
    /// Candidates are ordered by ascending visit count; ties keep row-major
    /// scan order.
    pub fn locate(&self, position: Position) -> Option<Target> {
        let memory = self.engine.memory();
        let mut candidates: Vec<(Position, u32)> = self
            .engine
            .index()
            .walkable_positions()
            .map(|candidate| (candidate, memory.visit_count(candidate)))
            .collect();
        candidates.sort_by_key(|&(_, count)| count);

        candidates
            .into_iter()
            .filter(|&(candidate, count)| candidate != position && count < self.ceiling)
            .find_map(|(candidate, _)| {
                self.engine
                    .shortest_path(position, candidate)
                    .filter(|path| !path.is_empty())
                    .map(|path| Target::new(candidate, path))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchLimits;
    use crate::grid::{GridIndex, GridSnapshot};
    use crate::memory::VisitationMemory;

    fn visit(memory: &mut VisitationMemory, position: Position, times: u32) {
        for _ in 0..times {
            memory.record_visit(position);
        }
    }

    #[test]
    fn picks_lowest_count_then_scan_order() {
        let grid = GridSnapshot::from_rows(&["...", "..."]).unwrap();
        let mut memory = VisitationMemory::new();
        for position in grid.dimensions().positions() {
            visit(&mut memory, position, 2);
        }
        memory.record_visit(Position::new(0, 0));
        // (0, 0) now has 3 visits; every other tile has 2.
        let engine = SearchEngine::new(GridIndex::new(&grid), &memory, SearchLimits::default());
        let target = LeastVisitedLocator::new(engine, 5)
            .locate(Position::new(0, 0))
            .unwrap();
        assert_eq!(target.position, Position::new(1, 0));
        assert_eq!(target.path.len(), 1);
    }

    #[test]
    fn never_returns_current_position() {
        let grid = GridSnapshot::from_rows(&["..."]).unwrap();
        let mut memory = VisitationMemory::new();
        visit(&mut memory, Position::new(1, 0), 4);
        visit(&mut memory, Position::new(2, 0), 4);
        let engine = SearchEngine::new(GridIndex::new(&grid), &memory, SearchLimits::default());
        let target = LeastVisitedLocator::new(engine, 5)
            .locate(Position::new(0, 0))
            .unwrap();
        assert_eq!(target.position, Position::new(1, 0));
    }

    #[test]
    fn skips_tiles_at_or_above_ceiling() {
        let grid = GridSnapshot::from_rows(&["..."]).unwrap();
        let mut memory = VisitationMemory::new();
        for position in grid.dimensions().positions() {
            visit(&mut memory, position, 5);
        }
        let engine = SearchEngine::new(GridIndex::new(&grid), &memory, SearchLimits::default());
        assert!(LeastVisitedLocator::new(engine, 5).locate(Position::new(0, 0)).is_none());
    }

    #[test]
    fn skips_unreachable_candidates() {
        let grid = GridSnapshot::from_rows(&["..|."]).unwrap();
        let mut memory = VisitationMemory::new();
        visit(&mut memory, Position::new(1, 0), 3);
        let engine = SearchEngine::new(GridIndex::new(&grid), &memory, SearchLimits::default());
        // (3, 0) has zero visits but sits behind a wall.
        let target = LeastVisitedLocator::new(engine, 5)
            .locate(Position::new(0, 0))
            .unwrap();
        assert_eq!(target.position, Position::new(1, 0));
    }
}
