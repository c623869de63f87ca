//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the environment, scenario loading and action
//! translation so the binary can bubble them up with consistent context.
use std::path::PathBuf;

use agent_core::{ErrorSeverity, GridError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("environment failure: {0}")]
    Environment(String),

    #[error("environment step called after the episode ended")]
    EpisodeOver,

    #[error("action map has no index for the Wait fallback")]
    MissingWaitMapping,

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("failed to read scenario file {}", .path.display())]
    ScenarioIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario RON")]
    ScenarioParse(#[from] ron::error::SpannedError),

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl RuntimeError {
    /// Returns the severity level of this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Environment(_) => ErrorSeverity::Recoverable,
            Self::EpisodeOver => ErrorSeverity::Internal,
            Self::Grid(err) => err.severity(),
            Self::MissingWaitMapping
            | Self::InvalidScenario(_)
            | Self::ScenarioIo { .. }
            | Self::ScenarioParse(_) => ErrorSeverity::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_environment_failures_are_recoverable() {
        assert!(RuntimeError::Environment("socket closed".into()).severity().is_recoverable());
        assert_eq!(RuntimeError::EpisodeOver.severity(), ErrorSeverity::Internal);
        let grid = GridError::EmptyDimensions {
            width: 0,
            height: 3,
        };
        assert_eq!(RuntimeError::from(grid).severity(), ErrorSeverity::Validation);
    }
}
