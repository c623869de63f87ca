//! Translation between agent actions and environment action indices.
use std::collections::HashMap;

use agent_core::Action;

use super::{Result, RuntimeError};

/// Maps each [`Action`] to the index an environment expects.
///
/// `Wait` must always be mapped: it is the fallback for any action the map
/// does not cover.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionMap {
    indices: HashMap<Action, u32>,
    wait: u32,
}

impl ActionMap {
    /// Builds a map from explicit entries.
    pub fn new(entries: impl IntoIterator<Item = (Action, u32)>) -> Result<Self> {
        let indices: HashMap<Action, u32> = entries.into_iter().collect();
        let wait = *indices
            .get(&Action::Wait)
            .ok_or(RuntimeError::MissingWaitMapping)?;
        Ok(Self { indices, wait })
    }

    /// The reduced NetHack Learning Environment action set.
    pub fn nle_reduced() -> Self {
        let indices = HashMap::from([
            (Action::Pickup, 0),
            (Action::North, 1),
            (Action::East, 2),
            (Action::South, 3),
            (Action::West, 4),
            (Action::Descend, 18),
            (Action::Wait, 19),
            (Action::Eat, 21),
        ]);
        Self { indices, wait: 19 }
    }

    pub fn index_of(&self, action: Action) -> Option<u32> {
        self.indices.get(&action).copied()
    }

    /// Index for `action`, or the Wait index when it is unmapped.
    pub fn translate(&self, action: Action) -> u32 {
        self.index_of(action).unwrap_or_else(|| {
            tracing::warn!("No environment index for {}, substituting Wait", action);
            self.wait
        })
    }

    /// Reverse lookup used by environments that decode indices.
    pub fn action_for(&self, index: u32) -> Option<Action> {
        self.indices
            .iter()
            .find_map(|(&action, &mapped)| (mapped == index).then_some(action))
    }
}

impl Default for ActionMap {
    fn default() -> Self {
        Self::nle_reduced()
    }
}
