use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, hash_map::Entry};

use crate::grid::Position;

use super::{Path, SearchEngine, Trail};

impl<'a> SearchEngine<'a> {
    /// Best-first search ordered by `cost + manhattan(current, goal)`.
    ///
    /// Equal priorities pop in insertion order. A tile over the path revisit
    /// threshold can still be returned as the goal but is never expanded, so
    /// the result is optimal only when pruning did not cut the optimal route.
    /// With `cost_ceiling` set, neighbours whose cost would exceed it are not
    /// enqueued.
    pub fn a_star(
        &self,
        start: Position,
        goal: Position,
        cost_ceiling: Option<u32>,
    ) -> Option<Path> {
        if start == goal {
            return Some(Path::empty());
        }

        let threshold = self.limits.path_revisit_threshold;
        let mut trail = Trail::default();
        let mut best_cost = HashMap::from([(start, 0u32)]);
        let mut closed = HashSet::new();
        let mut open = BinaryHeap::new();
        let mut sequence = 0u64;
        open.push(Reverse((start.manhattan(goal), sequence, start)));

        while let Some(Reverse((_, _, current))) = open.pop() {
            if current == goal {
                return Some(trail.path_to(goal));
            }
            if !closed.insert(current) {
                continue;
            }
            if current != start && self.memory.is_revisit_penalized(current, threshold) {
                continue;
            }

            let cost = best_cost[&current] + 1;
            if cost_ceiling.is_some_and(|ceiling| cost > ceiling) {
                continue;
            }
            for (direction, next) in self.neighbors(current) {
                if closed.contains(&next) || !self.index.walkable(next) {
                    continue;
                }
                match best_cost.entry(next) {
                    Entry::Occupied(entry) if *entry.get() <= cost => continue,
                    Entry::Occupied(mut entry) => {
                        entry.insert(cost);
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(cost);
                    }
                }
                trail.link(next, current, direction);
                sequence += 1;
                open.push(Reverse((cost + next.manhattan(goal), sequence, next)));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use crate::config::SearchLimits;
    use crate::grid::{GridIndex, GridSnapshot, Position};
    use crate::memory::VisitationMemory;
    use crate::search::SearchEngine;

    fn grid(rows: &[&str]) -> GridSnapshot {
        GridSnapshot::from_rows(rows).unwrap()
    }

    fn engine<'a>(grid: &'a GridSnapshot, memory: &'a VisitationMemory) -> SearchEngine<'a> {
        SearchEngine::new(GridIndex::new(grid), memory, SearchLimits::default())
    }

    #[test]
    fn open_grid_path_equals_manhattan() {
        let grid = grid(&["......", "......", "......", "......"]);
        let memory = VisitationMemory::new();
        let engine = engine(&grid, &memory);
        for start in grid.dimensions().positions() {
            for goal in grid.dimensions().positions() {
                let path = engine.a_star(start, goal, None).unwrap();
                assert_eq!(path.len() as u32, start.manhattan(goal), "{start} -> {goal}");
                assert_eq!(path.destination_from(start), goal);
            }
        }
    }

    #[test]
    fn path_never_shorter_than_manhattan() {
        let grid = grid(&["...|....", ".|.|.||.", ".|...|..", ".||||...", "........"]);
        let memory = VisitationMemory::new();
        let engine = engine(&grid, &memory);
        let index = GridIndex::new(&grid);
        let walkable: Vec<_> = index.walkable_positions().collect();
        for &start in &walkable {
            for &goal in &walkable {
                if let Some(path) = engine.a_star(start, goal, None) {
                    assert!(path.len() as u32 >= start.manhattan(goal));
                    assert_eq!(path.destination_from(start), goal);
                    assert!(path.positions_from(start).all(|p| index.walkable(p)));
                    let bfs = engine.shortest_path(start, goal).unwrap();
                    assert_eq!(path.len(), bfs.len());
                }
            }
        }
    }

    #[test]
    fn start_equals_goal_is_empty() {
        let grid = grid(&["..."]);
        let memory = VisitationMemory::new();
        let path = engine(&grid, &memory)
            .a_star(Position::new(1, 0), Position::new(1, 0), Some(0))
            .unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn cost_ceiling_cuts_long_routes() {
        let grid = grid(&["..|..", "..|..", "....."]);
        let memory = VisitationMemory::new();
        let engine = engine(&grid, &memory);
        let (start, goal) = (Position::new(0, 0), Position::new(4, 0));
        assert_eq!(engine.a_star(start, goal, Some(8)).map(|p| p.len()), Some(8));
        assert_eq!(engine.a_star(start, goal, Some(7)), None);
    }

    #[test]
    fn over_visited_goal_is_still_reached() {
        let grid = grid(&["...."]);
        let mut memory = VisitationMemory::new();
        for _ in 0..30 {
            memory.record_visit(Position::new(3, 0));
        }
        let path = engine(&grid, &memory)
            .a_star(Position::new(0, 0), Position::new(3, 0), None)
            .unwrap();
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn over_visited_choke_point_blocks_route() {
        let grid = grid(&["..|..", ".....", "..|.."]);
        let mut memory = VisitationMemory::new();
        for _ in 0..11 {
            memory.record_visit(Position::new(2, 1));
        }
        assert_eq!(
            engine(&grid, &memory).a_star(Position::new(0, 0), Position::new(4, 0), None),
            None
        );
    }
}
