//! Error type shared by the executors and the DFT engine.

use thiserror::Error;

/// Failure of a partitioned operation.
///
/// Any error means the output buffer of the failing call is in an
/// indeterminate state and should be discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessingError {
    /// A dispatched task never reported completion.
    #[error("interrupted: {0}")]
    Interrupted(String),
    /// A dispatched task panicked.
    #[error("internal error in {worker}: {cause}")]
    WorkerFailure { worker: String, cause: String },
    /// The worker threads could not be started.
    #[error("failed to build worker pool: {0}")]
    PoolBuild(String),
    #[error("input sequence is empty")]
    EmptyInput,
    #[error("sequence lengths do not match")]
    MismatchedLengths,
}

impl ProcessingError {
    /// `true` for failures a caller may reasonably retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProcessingError::Interrupted(_))
    }
}
