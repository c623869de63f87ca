//! Error infrastructure for agent-core.
//!
//! Searches and decisions never fail: an unreachable goal is `None` and the
//! policy falls through to its next rule. The only errors in this crate come
//! from building malformed inputs, such as a snapshot whose buffers do not
//! match its declared dimensions.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; the caller may retry or try another strategy.
    Recoverable,

    /// Invalid input that should be rejected without retry.
    Validation,

    /// Unexpected inconsistency that indicates a bug.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Errors raised while constructing a [`crate::GridSnapshot`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid dimensions {width}x{height} must be non-zero")]
    EmptyDimensions { width: u32, height: u32 },

    #[error("{layer} layer holds {actual} cells, expected {expected}")]
    LayerSizeMismatch {
        layer: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("row {row} has width {actual}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

impl GridError {
    /// Returns the severity level of this error.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}
