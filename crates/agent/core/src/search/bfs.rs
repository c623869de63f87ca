use std::collections::{HashSet, VecDeque};

use crate::config::FrontierOrder;
use crate::grid::Position;

use super::{Path, SearchEngine, Target, Trail};

/// When a search tests its goal predicate against a freshly discovered tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GoalCheck {
    /// Before revisit pruning: a goal on an over-visited tile is still found.
    BeforePruning,
    /// After revisit pruning: an over-visited goal is unreachable.
    AfterPruning,
}

impl<'a> SearchEngine<'a> {
    /// Shortest 4-connected path from `start` to `goal`.
    ///
    /// Returns `Some(Path::empty())` when `start == goal` and `None` when the
    /// goal cannot be reached through walkable tiles under the path revisit
    /// threshold. Breadth-first order guarantees the first path recorded for
    /// the goal has the fewest moves.
    pub fn shortest_path(&self, start: Position, goal: Position) -> Option<Path> {
        if start == goal {
            return Some(Path::empty());
        }
        self.expand(
            start,
            self.limits.path_revisit_threshold,
            FrontierOrder::BreadthFirst,
            GoalCheck::AfterPruning,
            |position| position == goal,
        )
        .map(|target| target.path)
    }

    /// Nearest tile holding an unclaimed item.
    ///
    /// Standing on such a tile returns it with an empty path without
    /// searching. The item test runs before revisit pruning, so an item lying
    /// on a heavily visited tile is still found when the search reaches it.
    pub fn nearest_item(&self, start: Position) -> Option<Target> {
        let is_goal =
            |position: Position| self.index.is_item(position) && !self.is_claimed(position);
        if is_goal(start) {
            return Some(Target::new(start, Path::empty()));
        }
        self.expand(
            start,
            self.limits.path_revisit_threshold,
            FrontierOrder::BreadthFirst,
            GoalCheck::BeforePruning,
            is_goal,
        )
    }

    /// Nearest walkable tile not yet marked seen on this level.
    ///
    /// Returns `None` exactly when every walkable tile reachable from `start`
    /// (under the frontier revisit threshold) has been seen.
    pub fn nearest_frontier(&self, start: Position) -> Option<Target> {
        self.nearest_frontier_ordered(start, FrontierOrder::BreadthFirst)
    }

    /// Frontier search with an explicit expansion order.
    ///
    /// Only [`FrontierOrder::BreadthFirst`] guarantees the nearest frontier.
    pub fn nearest_frontier_ordered(
        &self,
        start: Position,
        order: FrontierOrder,
    ) -> Option<Target> {
        let memory = self.memory;
        self.expand(
            start,
            self.limits.frontier_revisit_threshold,
            order,
            GoalCheck::BeforePruning,
            |position| !memory.is_seen(position),
        )
    }

    /// Shared expansion loop.
    ///
    /// `is_goal` is only consulted for in-bounds walkable tiles not yet closed
    /// by this search.
    fn expand<G>(
        &self,
        start: Position,
        revisit_threshold: u32,
        order: FrontierOrder,
        check: GoalCheck,
        is_goal: G,
    ) -> Option<Target>
    where
        G: Fn(Position) -> bool,
    {
        let mut trail = Trail::default();
        let mut closed = HashSet::from([start]);
        let mut frontier = VecDeque::from([start]);

        while let Some(current) = match order {
            FrontierOrder::BreadthFirst => frontier.pop_front(),
            FrontierOrder::DepthFirst => frontier.pop_back(),
        } {
            for (direction, next) in self.neighbors(current) {
                if closed.contains(&next) || !self.index.walkable(next) {
                    continue;
                }
                if check == GoalCheck::BeforePruning && is_goal(next) {
                    trail.link(next, current, direction);
                    return Some(Target::new(next, trail.path_to(next)));
                }
                if self.memory.is_revisit_penalized(next, revisit_threshold) {
                    continue;
                }
                closed.insert(next);
                trail.link(next, current, direction);
                if check == GoalCheck::AfterPruning && is_goal(next) {
                    return Some(Target::new(next, trail.path_to(next)));
                }
                frontier.push_back(next);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::config::{FrontierOrder, SearchLimits};
    use crate::grid::{CardinalDirection, GridIndex, GridSnapshot, MapDimensions, Position};
    use crate::memory::VisitationMemory;
    use crate::search::SearchEngine;

    use CardinalDirection::{East, North, South};

    fn grid(rows: &[&str]) -> GridSnapshot {
        GridSnapshot::from_rows(rows).unwrap()
    }

    fn engine<'a>(grid: &'a GridSnapshot, memory: &'a VisitationMemory) -> SearchEngine<'a> {
        SearchEngine::new(GridIndex::new(grid), memory, SearchLimits::default())
    }

    /// Exhaustive BFS distance with no pruning, used as an oracle.
    fn true_distance(grid: &GridSnapshot, start: Position, goal: Position) -> Option<usize> {
        let index = GridIndex::new(grid);
        let mut dist = std::collections::HashMap::from([(start, 0usize)]);
        let mut queue = std::collections::VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            if current == goal {
                return dist.get(&goal).copied();
            }
            for direction in CardinalDirection::ALL {
                let next = current.step(direction);
                if index.walkable(next) && !dist.contains_key(&next) {
                    dist.insert(next, dist[&current] + 1);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    #[test]
    fn shortest_path_to_self_is_empty() {
        let grid = grid(&["...", "...", "..."]);
        let memory = VisitationMemory::new();
        let engine = engine(&grid, &memory);
        for position in grid.dimensions().positions() {
            assert_eq!(engine.shortest_path(position, position).map(|p| p.len()), Some(0));
        }
    }

    #[test]
    fn shortest_path_matches_graph_distance() {
        let grid = grid(&[
            ".....|....",
            ".|||.|.||.",
            ".|...|..|.",
            ".|.|||..|.",
            "...|......",
        ]);
        let memory = VisitationMemory::new();
        let engine = engine(&grid, &memory);
        let index = GridIndex::new(&grid);
        let walkable: Vec<_> = index.walkable_positions().collect();
        for &start in &walkable {
            for &goal in &walkable {
                let expected = true_distance(&grid, start, goal);
                let path = engine.shortest_path(start, goal);
                assert_eq!(path.as_ref().map(|p| p.len()), expected, "{start} -> {goal}");
                if let Some(path) = path {
                    assert_eq!(path.destination_from(start), goal);
                    assert!(path.positions_from(start).all(|p| index.walkable(p)));
                }
            }
        }
    }

    #[test]
    fn shortest_path_routes_around_walls() {
        let grid = grid(&["..|..", "..|..", "....."]);
        let memory = VisitationMemory::new();
        let path = engine(&grid, &memory)
            .shortest_path(Position::new(0, 0), Position::new(4, 0))
            .unwrap();
        assert_eq!(path.len(), 8);
    }

    #[test]
    fn shortest_path_to_walled_off_goal_is_none() {
        let grid = grid(&["..|..", "..|..", "..|.."]);
        let memory = VisitationMemory::new();
        assert_eq!(
            engine(&grid, &memory).shortest_path(Position::new(0, 0), Position::new(4, 2)),
            None
        );
    }

    #[test]
    fn shortest_path_avoids_over_visited_corridor() {
        // Two routes; the short one runs through a tile visited 11 times.
        let grid = grid(&["...", ".|.", "..."]);
        let mut memory = VisitationMemory::new();
        for _ in 0..11 {
            memory.record_visit(Position::new(1, 0));
        }
        let path = engine(&grid, &memory)
            .shortest_path(Position::new(0, 0), Position::new(2, 0))
            .unwrap();
        assert_eq!(path.steps(), &[South, South, East, East, North, North]);
    }

    #[test]
    fn nearest_item_two_steps_east() {
        let grid = grid(&[".....", ".....", "....$", ".....", "....."]);
        let memory = VisitationMemory::new();
        let target = engine(&grid, &memory)
            .nearest_item(Position::new(2, 2))
            .unwrap();
        assert_eq!(target.position, Position::new(4, 2));
        assert_eq!(target.path.steps(), &[East, East]);
    }

    #[test]
    fn nearest_item_on_start_returns_empty_path() {
        let grid = grid(&["..?.."]);
        let memory = VisitationMemory::new();
        let target = engine(&grid, &memory)
            .nearest_item(Position::new(2, 0))
            .unwrap();
        assert_eq!(target.position, Position::new(2, 0));
        assert!(target.path.is_empty());
    }

    #[test]
    fn nearest_item_finds_item_on_over_visited_tile() {
        let grid = grid(&[".!."]);
        let mut memory = VisitationMemory::new();
        for _ in 0..20 {
            memory.record_visit(Position::new(1, 0));
        }
        let target = engine(&grid, &memory)
            .nearest_item(Position::new(0, 0))
            .unwrap();
        assert_eq!(target.position, Position::new(1, 0));
    }

    #[test]
    fn nearest_item_skips_claimed_tiles() {
        let grid = grid(&["$.$.."]);
        let memory = VisitationMemory::new();
        let claimed = HashSet::from([Position::new(0, 0)]);
        let target = engine(&grid, &memory)
            .with_claimed(&claimed)
            .nearest_item(Position::new(0, 0))
            .unwrap();
        assert_eq!(target.position, Position::new(2, 0));
        assert_eq!(target.path.steps(), &[East, East]);
    }

    #[test]
    fn nearest_item_path_stays_on_walkable_tiles() {
        let grid = grid(&["..|......", "..|.||||.", "....|..*.", "||..|....", "........."]);
        let memory = VisitationMemory::new();
        let index = GridIndex::new(&grid);
        let start = Position::new(0, 0);
        let target = engine(&grid, &memory).nearest_item(start).unwrap();
        assert_eq!(target.position, Position::new(7, 2));
        assert!(target.path.positions_from(start).all(|p| index.walkable(p)));
    }

    #[test]
    fn nearest_frontier_prefers_closest_unseen_tile() {
        let grid = grid(&["......", "......", "......"]);
        let mut memory = VisitationMemory::new();
        memory.mark_seen(Position::new(1, 1), 1, MapDimensions::new(6, 3));
        let target = engine(&grid, &memory)
            .nearest_frontier(Position::new(1, 1))
            .unwrap();
        assert_eq!(target.position, Position::new(3, 1));
        assert_eq!(target.path.steps(), &[East, East]);
    }

    #[test]
    fn nearest_frontier_none_when_everything_reachable_is_seen() {
        // The right room is unseen but walled off.
        let walled = grid(&["...|..", "...|..", "...|.."]);
        let mut memory = VisitationMemory::new();
        memory.mark_seen(Position::new(1, 1), 1, MapDimensions::new(6, 3));
        assert!(engine(&walled, &memory).nearest_frontier(Position::new(1, 1)).is_none());

        // Opening the wall exposes the unseen tiles.
        let opened = grid(&["......", "...|..", "...|.."]);
        assert!(engine(&opened, &memory).nearest_frontier(Position::new(1, 1)).is_some());
    }

    #[test]
    fn nearest_frontier_ignores_unseen_walls() {
        let grid = grid(&["..|||"]);
        let mut memory = VisitationMemory::new();
        memory.mark_seen(Position::new(0, 0), 1, MapDimensions::new(5, 1));
        assert!(engine(&grid, &memory).nearest_frontier(Position::new(0, 0)).is_none());
    }

    #[test]
    fn depth_first_frontier_still_finds_an_unseen_tile() {
        let grid = grid(&[".......", ".......", "......."]);
        let mut memory = VisitationMemory::new();
        memory.mark_seen(Position::new(3, 1), 1, MapDimensions::new(7, 3));
        let engine = engine(&grid, &memory);
        let start = Position::new(3, 1);
        let target = engine
            .nearest_frontier_ordered(start, FrontierOrder::DepthFirst)
            .unwrap();
        assert!(!memory.is_seen(target.position));
        assert_eq!(target.path.destination_from(start), target.position);
    }
}
