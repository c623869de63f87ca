//! Graph searches over the 4-connected walkable grid.
//!
//! Every search shares the same neighbour expansion (North, East, South,
//! West), the same bounds and walkability filter, and the same revisit
//! pruning: a tile visited more often than the call site's threshold is
//! never expanded. Each call keeps its own closed set, independent of the
//! level-wide seen map, so a single search cannot cycle.
//!
//! No search fails loudly. An unreachable goal is `None`, which the policy
//! reads as "try the next strategy".
mod astar;
mod bfs;
mod path;

use std::collections::{HashMap, HashSet};

pub use path::{Path, Target};

use crate::config::SearchLimits;
use crate::grid::{CardinalDirection, GridIndex, Position};
use crate::memory::VisitationMemory;

/// Search entry point bound to one tick's grid and the level's memory.
#[derive(Clone, Copy, Debug)]
pub struct SearchEngine<'a> {
    index: GridIndex<'a>,
    memory: &'a VisitationMemory,
    limits: SearchLimits,
    claimed: Option<&'a HashSet<Position>>,
}

impl<'a> SearchEngine<'a> {
    pub fn new(index: GridIndex<'a>, memory: &'a VisitationMemory, limits: SearchLimits) -> Self {
        Self {
            index,
            memory,
            limits,
            claimed: None,
        }
    }

    /// Excludes tiles whose pickup is already under way from item targeting.
    #[must_use]
    pub fn with_claimed(mut self, claimed: &'a HashSet<Position>) -> Self {
        self.claimed = Some(claimed);
        self
    }

    pub fn index(&self) -> GridIndex<'a> {
        self.index
    }

    pub fn memory(&self) -> &'a VisitationMemory {
        self.memory
    }

    fn is_claimed(&self, position: Position) -> bool {
        self.claimed.is_some_and(|claimed| claimed.contains(&position))
    }

    /// In-bounds neighbours of `position` in expansion order.
    fn neighbors(&self, position: Position) -> impl Iterator<Item = (CardinalDirection, Position)> {
        let index = self.index;
        CardinalDirection::ALL
            .into_iter()
            .map(move |direction| (direction, position.step(direction)))
            .filter(move |&(_, next)| index.contains(next))
    }
}

/// Parent links recorded while a search runs.
#[derive(Debug, Default)]
struct Trail {
    parents: HashMap<Position, (Position, CardinalDirection)>,
}

impl Trail {
    fn link(&mut self, child: Position, parent: Position, direction: CardinalDirection) {
        self.parents.insert(child, (parent, direction));
    }

    /// Walks parent links back from `goal` and returns the forward path.
    fn path_to(&self, goal: Position) -> Path {
        let mut steps = Vec::new();
        let mut current = goal;
        while let Some(&(parent, direction)) = self.parents.get(&current) {
            steps.push(direction);
            current = parent;
        }
        steps.reverse();
        Path::from_steps(steps)
    }
}
