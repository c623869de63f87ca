use crate::action::Action;
use crate::grid::{CardinalDirection, Position};

/// Ordered moves from a start position to a goal.
///
/// An empty path means the start already is the goal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    steps: Vec<CardinalDirection>,
}

impl Path {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_steps(steps: Vec<CardinalDirection>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[CardinalDirection] {
        &self.steps
    }

    /// The action that takes the first step, if any.
    pub fn first_action(&self) -> Option<Action> {
        self.steps.first().copied().map(Action::from)
    }

    /// Positions entered along the path, excluding `start`.
    pub fn positions_from(&self, start: Position) -> impl Iterator<Item = Position> + '_ {
        self.steps.iter().scan(start, |current, &direction| {
            *current = current.step(direction);
            Some(*current)
        })
    }

    /// Where the path ends when walked from `start`.
    pub fn destination_from(&self, start: Position) -> Position {
        self.positions_from(start).last().unwrap_or(start)
    }
}

/// A goal found by a search together with the path to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub position: Position,
    pub path: Path,
}

impl Target {
    pub fn new(position: Position, path: Path) -> Self {
        Self { position, path }
    }

    /// First move toward the target; `None` when already standing on it.
    pub fn first_action(&self) -> Option<Action> {
        self.path.first_action()
    }
}
