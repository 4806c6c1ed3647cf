//! Error types for process execution.

use thiserror::Error;

/// Errors raised while running an external command.
#[derive(Debug, Error)]
pub enum ProcError {
    /// The program could not be spawned.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// Waiting on the child failed.
    #[error("failed to wait on {program}: {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },

    /// The child did not finish within the configured timeout.
    #[error("{program} timed out after {timeout_ms}ms")]
    Timeout { program: String, timeout_ms: u64 },

    /// The child finished with a nonzero or signalled exit status.
    #[error("{program} exited with status {status}")]
    Failed { program: String, status: String },
}

/// Convenience alias for results with [`ProcError`].
pub type Result<T> = std::result::Result<T, ProcError>;
