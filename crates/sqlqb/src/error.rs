//! Error types for sqlqb

use thiserror::Error;

/// Result type alias for sqlqb operations
pub type QbResult<T> = Result<T, QbError>;

/// Error types for rendering and running statements
#[derive(Debug, Error)]
pub enum QbError {
    /// A concat/expression part that is neither literal SQL nor a fragment
    #[error("{0} is not a string or Fragment")]
    UnsupportedPart(String),

    /// SELECT rendered without any result column
    #[error("select statements must have at least one result column")]
    NoColumns,

    /// NULL bound to an operator family that cannot express it
    #[error("cannot use null with {0} operators")]
    NullOperand(&'static str),

    /// A list bound to an operator family that cannot expand it
    #[error("cannot use array or slice with {0} operators")]
    ListOperand(&'static str),

    /// Statement executed without a runner
    #[error("cannot run; no runner set (run_with)")]
    RunnerNotSet,

    /// `scan` received no row
    #[error("no rows in result set")]
    NoRows,

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error raised by the runner / driver
    #[error("Driver error: {0}")]
    Driver(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl QbError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Wrap a driver error
    pub fn driver(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Driver(err.into())
    }

    /// Check if this is the "no runner configured" sentinel
    pub fn is_runner_not_set(&self) -> bool {
        matches!(self, Self::RunnerNotSet)
    }

    /// Check if this is a driver error
    pub fn is_driver(&self) -> bool {
        matches!(self, Self::Driver(_))
    }
}
