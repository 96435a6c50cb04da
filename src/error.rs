use std::time::Duration;

use thiserror::Error;

use crate::algorithm::Algorithm;
use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Rejected before any run of the batch was created.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("a batch is already in flight")]
    ReentrantStart,

    #[error("gave up after {waited:?} waiting for {pending:?}")]
    RunTimedOut {
        waited: Duration,
        pending: Vec<Algorithm>,
    },

    #[error("batch was cancelled before {pending:?} completed")]
    Cancelled { pending: Vec<Algorithm> },

    #[error("unknown algorithm: {0:?}")]
    UnknownAlgorithm(String),

    #[error("failed to spawn worker for {algorithm}")]
    Spawn {
        algorithm: Algorithm,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
