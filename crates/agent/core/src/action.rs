//! The fixed set of actions the agent can emit.
use crate::grid::CardinalDirection;

/// A single discrete action chosen for one tick.
///
/// The environment owns its own action-index space; translating an [`Action`]
/// into it is the runtime's job.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::IntoStaticStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    #[strum(serialize = "NORTH (k)")]
    North,
    #[strum(serialize = "SOUTH (j)")]
    South,
    #[strum(serialize = "EAST (l)")]
    East,
    #[strum(serialize = "WEST (h)")]
    West,
    #[strum(serialize = "PICKUP (,)")]
    Pickup,
    #[strum(serialize = "EAT (e)")]
    Eat,
    #[strum(serialize = "WAIT (.)")]
    Wait,
    #[strum(serialize = "DOWN (>)")]
    Descend,
}

impl Action {
    pub const MOVES: [Action; 4] = [Action::North, Action::South, Action::East, Action::West];

    /// Label used when logging the action.
    pub fn label(self) -> &'static str {
        self.into()
    }

    pub fn direction(self) -> Option<CardinalDirection> {
        match self {
            Action::North => Some(CardinalDirection::North),
            Action::South => Some(CardinalDirection::South),
            Action::East => Some(CardinalDirection::East),
            Action::West => Some(CardinalDirection::West),
            _ => None,
        }
    }

    pub fn is_move(self) -> bool {
        self.direction().is_some()
    }

    /// Pickup and Eat take two ticks: the command, then a confirming wait.
    pub fn needs_confirmation(self) -> bool {
        matches!(self, Action::Pickup | Action::Eat)
    }
}

impl From<CardinalDirection> for Action {
    fn from(direction: CardinalDirection) -> Self {
        match direction {
            CardinalDirection::North => Action::North,
            CardinalDirection::South => Action::South,
            CardinalDirection::East => Action::East,
            CardinalDirection::West => Action::West,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
