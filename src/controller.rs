// src/controller.rs
//! Submission controller: validate, send once, settle into a terminal state

use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::core::service_client::{into_outcome, AnalysisBackend};
use crate::errors::{SubmissionError, SubmitRejected};
use crate::input::SubmissionInput;
use crate::types::AnalysisResult;
use crate::validation::{validate, ValidatedSubmission};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    Validating,
    InFlight,
    Succeeded(AnalysisResult),
    Failed(String),
}

impl RequestState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, RequestState::InFlight)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Succeeded(_) | RequestState::Failed(_))
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !matches!(self, RequestState::Validating | RequestState::InFlight)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            RequestState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// A validated payload waiting for the backend. Produced by
/// [`SubmissionController::begin`].
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub request_id: Uuid,
    pub submission: ValidatedSubmission,
}

pub struct SubmissionController<B: AnalysisBackend> {
    backend: B,
    state: watch::Sender<RequestState>,
}

impl<B: AnalysisBackend> SubmissionController<B> {
    pub fn new(backend: B) -> Self {
        let (state, _) = watch::channel(RequestState::Idle);
        Self { backend, state }
    }

    pub fn state(&self) -> RequestState {
        self.state.borrow().clone()
    }

    /// Receive every state transition, e.g. to redraw a view.
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Validate `input` and move to `InFlight`.
    ///
    /// Any prior result or error is dropped first. Returns `Ok(None)` when
    /// validation failed; the state is then `Failed` and nothing is sent.
    pub fn begin(
        &mut self,
        input: &SubmissionInput,
    ) -> Result<Option<PendingSubmission>, SubmitRejected> {
        if !self.state.borrow().can_submit() {
            warn!("Submit ignored: a request is already in flight");
            return Err(SubmitRejected::RequestInFlight);
        }

        self.transition(RequestState::Validating);

        match validate(input) {
            Ok(submission) => {
                self.transition(RequestState::InFlight);
                Ok(Some(PendingSubmission {
                    request_id: Uuid::new_v4(),
                    submission,
                }))
            }
            Err(e) => {
                info!("Submission failed validation: {}", e);
                self.fail(SubmissionError::Validation(e));
                Ok(None)
            }
        }
    }

    /// Install the terminal state for the pending request.
    ///
    /// The state goes from `InFlight` to `Succeeded`/`Failed` in one step.
    pub fn settle(&mut self, outcome: Result<AnalysisResult, SubmissionError>) {
        match outcome {
            Ok(result) => {
                info!(
                    "Analysis succeeded: score {}, {} matched, {} missing",
                    result.match_score,
                    result.matched_keywords.len(),
                    result.missing_keywords.len()
                );
                self.transition(RequestState::Succeeded(result));
            }
            Err(e) => self.fail(e),
        }
    }

    /// Run one full submission and return the terminal state.
    pub async fn submit(&mut self, input: &SubmissionInput) -> Result<RequestState, SubmitRejected> {
        let Some(pending) = self.begin(input)? else {
            return Ok(self.state());
        };

        let span = info_span!("analysis", request_id = %pending.request_id);
        let reply = self
            .backend
            .analyze(&pending.submission)
            .instrument(span.clone())
            .await;

        let _entered = span.enter();
        self.settle(into_outcome(reply));
        Ok(self.state())
    }

    /// Return from a terminal state to `Idle`.
    pub fn reset(&mut self) {
        if self.state.borrow().is_terminal() {
            self.transition(RequestState::Idle);
        }
    }

    fn fail(&mut self, error: SubmissionError) {
        self.transition(RequestState::Failed(error.user_message()));
    }

    fn transition(&mut self, next: RequestState) {
        self.state.send_replace(next);
    }
}
