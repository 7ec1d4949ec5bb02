//! Error types for the rlbandits library.

use thiserror::Error;

/// Result type alias for simulation operations.
pub type Result<T> = std::result::Result<T, BanditError>;

/// Errors that can occur while building or running bandit experiments.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BanditError {
    /// Invalid construction or experiment parameter.
    #[error("invalid configuration: {message}")]
    Configuration { message: String },

    /// An action index outside `[0, k)` was referenced.
    #[error("invalid action {action}: expected an index in [0, {k})")]
    InvalidAction { action: usize, k: usize },

    /// The agent cannot act in its current state.
    #[error("invalid state: {message}")]
    InvalidState { message: String },

    /// Agent and environment disagree on the number of actions.
    #[error("dimension mismatch: agent has {expected} actions, environment has {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Value estimates became non-finite.
    #[error("numerical instability: non-finite estimates in run {run} at step {step}")]
    NumericalInstability { run: usize, step: usize },
}

impl BanditError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        BanditError::Configuration {
            message: message.into(),
        }
    }

    /// Attach the run index to a run-scoped error.
    pub(crate) fn in_run(self, run: usize) -> Self {
        match self {
            BanditError::NumericalInstability { step, .. } => {
                BanditError::NumericalInstability { run, step }
            }
            other => other,
        }
    }
}
