//! The boundary between the driver and whatever simulates the dungeon.
use agent_core::Observation;
use async_trait::async_trait;

use super::Result;

/// What the environment reports after applying one action.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult {
    pub observation: Observation,
    /// Positive exactly when an item was gained this step.
    pub reward: f64,
    /// The episode ended inside the game, usually by death.
    pub terminated: bool,
    /// The environment's own step limit was reached.
    pub truncated: bool,
}

impl StepResult {
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// A dungeon the agent can act in.
///
/// Actions cross this boundary as environment-specific indices; the driver
/// translates them through an [`crate::ActionMap`].
#[async_trait]
pub trait Environment: Send {
    /// Starts a new episode and returns the first observation.
    async fn reset(&mut self) -> Result<Observation>;

    /// Applies the action with the given index.
    async fn step(&mut self, action: u32) -> Result<StepResult>;
}
