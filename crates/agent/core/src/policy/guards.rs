//! Overrides that keep the agent from standing still or pacing back and forth.
//!
//! Both guards run after the priority ladder has chosen an action and may replace
//! it with a random direction. Each replacement also arms a burst of random
//! exploration so the agent leaves the area before the ladder resumes.
use crate::action::Action;
use crate::config::AgentConfig;
use crate::grid::{CardinalDirection, Position};
use crate::rng::{RngOracle, compute_seed};

use super::{Agent, Intent, draw};

/// Direction of the last move when `recent` strictly alternates between two
/// opposite directions.
pub(super) fn oscillation(recent: &[Action]) -> Option<CardinalDirection> {
    if recent.len() < 2 {
        return None;
    }
    let directions: Option<Vec<CardinalDirection>> =
        recent.iter().map(|action| action.direction()).collect();
    let directions = directions?;
    directions
        .windows(2)
        .all(|pair| pair[1] == pair[0].opposite())
        .then(|| directions[directions.len() - 1])
}

impl<R: RngOracle> Agent<R> {
    /// Tracks consecutive ticks at the same position and, once the count
    /// exceeds the stuck limit, replaces `action` with a random direction other
    /// than the previous action. Any action is replaced, so a refused Descend
    /// or Pickup cannot repeat forever.
    pub(super) fn stuck_guard(&mut self, position: Position, action: Action) -> Option<Action> {
        if self.state.last_position != Some(position) {
            self.state.stuck_count = 0;
            return None;
        }

        self.state.stuck_count += 1;
        if self.state.stuck_count <= self.config.stuck_limit {
            return None;
        }

        let options: Vec<Action> = Action::MOVES
            .into_iter()
            .filter(|&candidate| Some(candidate) != self.state.last_action)
            .collect();
        let seed = compute_seed(self.config.seed, self.state.tick, draw::STUCK);
        let replacement = self.rng.choose(seed, &options)?;

        tracing::warn!(
            "Stuck at {} for {} ticks, forcing {}",
            position,
            self.state.stuck_count,
            replacement
        );
        self.state.arm_exploration(self.config.exploration_burst);
        self.state.stuck_count = 0;
        Some(replacement)
    }

    /// Replaces `action` with a perpendicular direction when the recorded
    /// history is a strict two-direction alternation, then resets the history
    /// to the replacement alone.
    pub(super) fn oscillation_guard(&mut self, action: Action) -> Option<Action> {
        if !action.is_move() {
            return None;
        }
        let recent = self.state.history.tail(AgentConfig::OSCILLATION_WINDOW)?;
        let axis = oscillation(recent)?;

        let options = axis.perpendicular().map(Action::from);
        let seed = compute_seed(self.config.seed, self.state.tick, draw::OSCILLATION);
        let replacement = self.rng.choose(seed, &options)?;

        tracing::warn!(
            "Breaking {} oscillation with {}",
            if axis.is_vertical() { "north-south" } else { "east-west" },
            replacement
        );
        self.state.arm_exploration(self.config.exploration_burst);
        self.state.history.reset_to(replacement);
        Some(replacement)
    }

    /// Runs both guards in order and records the final action in the history.
    pub(super) fn apply_guards(
        &mut self,
        position: Position,
        action: Action,
        intent: Intent,
    ) -> (Action, Intent) {
        let (action, intent) = match self.stuck_guard(position, action) {
            Some(replacement) => (replacement, Intent::Unstick),
            None => (action, intent),
        };
        match self.oscillation_guard(action) {
            Some(replacement) => (replacement, Intent::BreakOscillation),
            None => {
                self.state.history.push(action);
                (action, intent)
            }
        }
    }
}
