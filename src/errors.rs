// src/errors.rs
use thiserror::Error;
use tracing::error;

use crate::validation::ValidationError;

/// Shown for every transport-level failure; the cause only goes to the log.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to analyze. Please try again.";

/// Why a submission ended in `Failed`.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    ServiceReported(String),

    #[error("Transport error: {0:#}")]
    Transport(#[source] anyhow::Error),
}

impl SubmissionError {
    /// The single string the user gets to see.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Validation(e) => e.to_string(),
            SubmissionError::ServiceReported(msg) => msg.clone(),
            SubmissionError::Transport(e) => {
                error!("Analysis request failed: {e:?}");
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

/// Returned by `begin` when a request is already pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("An analysis request is already in flight")]
    RequestInFlight,
}
