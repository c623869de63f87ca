use std::collections::HashSet;

use arrayvec::ArrayVec;

use crate::action::Action;
use crate::config::AgentConfig;
use crate::grid::Position;

/// Per-episode mutable state of the decision policy.
///
/// Created when an episode starts, mutated once per tick and dropped when
/// the episode ends. Nothing in it is shared between agents.
#[derive(Clone, Debug, Default)]
pub struct DecisionState {
    /// Items the policy issued a pickup or eat for.
    pub items_collected: u32,
    /// Set on the first observed increase of the dungeon level.
    pub descended: bool,
    pub last_position: Option<Position>,
    pub last_action: Option<Action>,
    pub history: ActionHistory,
    /// Consecutive ticks without a position change.
    pub stuck_count: u32,
    /// Remaining ticks of forced random movement.
    pub exploration_steps: u32,
    pub last_depth: Option<u32>,
    /// Pickup or eat issued last tick, awaiting its confirming wait.
    pub pending: Option<PendingConfirmation>,
    /// Tiles whose pickup was initiated on the current level.
    pub claimed: HashSet<Position>,
    /// Ticks decided so far this episode.
    pub tick: u64,
}

impl DecisionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the pickup at `position` has been initiated on this level.
    pub fn is_claimed(&self, position: Position) -> bool {
        self.claimed.contains(&position)
    }

    /// Arms `steps` ticks of random movement.
    pub fn arm_exploration(&mut self, steps: u32) {
        self.exploration_steps = steps;
    }
}

/// A two-tick action waiting for its confirmation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub position: Position,
    pub action: Action,
}

/// The most recent actions, oldest first.
///
/// Holds at most [`AgentConfig::HISTORY_LEN`] entries; pushing onto a full
/// history discards the oldest one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionHistory {
    actions: ArrayVec<Action, { AgentConfig::HISTORY_LEN }>,
}

impl ActionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Action) {
        if self.actions.is_full() {
            self.actions.remove(0);
        }
        self.actions.push(action);
    }

    /// Replaces the whole history with a single action.
    pub fn reset_to(&mut self, action: Action) {
        self.actions.clear();
        self.actions.push(action);
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The trailing `count` actions, or `None` when fewer were recorded.
    pub fn tail(&self, count: usize) -> Option<&[Action]> {
        let len = self.actions.len();
        (len >= count).then(|| &self.actions[len - count..])
    }
}

impl FromIterator<Action> for ActionHistory {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut history = Self::new();
        for action in iter {
            history.push(action);
        }
        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_discards_oldest_when_full() {
        let mut history = ActionHistory::new();
        history.push(Action::Wait);
        for _ in 0..AgentConfig::HISTORY_LEN {
            history.push(Action::North);
        }
        assert_eq!(history.len(), AgentConfig::HISTORY_LEN);
        assert!(history.as_slice().iter().all(|&a| a == Action::North));
    }

    #[test]
    fn tail_requires_enough_entries() {
        let history: ActionHistory = [Action::North, Action::South].into_iter().collect();
        assert_eq!(history.tail(3), None);
        assert_eq!(history.tail(1), Some(&[Action::South][..]));
    }

    #[test]
    fn reset_keeps_only_new_action() {
        let mut history: ActionHistory = [Action::East; 7].into_iter().collect();
        history.reset_to(Action::North);
        assert_eq!(history.as_slice(), &[Action::North]);
    }
}
