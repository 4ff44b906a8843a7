// src/core/service_client.rs
//! HTTP client for the remote analysis service

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{error, info, trace};

use crate::errors::SubmissionError;
use crate::types::response::{error_message, AnalysisResult, ServiceReply};
use crate::validation::ValidatedSubmission;

const ANALYZE_ENDPOINT: &str = "/analyze/";
const PDF_MIME: &str = "application/pdf";

/// Anything that can turn a validated submission into a service reply.
///
/// `Err` is always a transport-level failure; service rejections come back
/// as [`ServiceReply::Rejected`].
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, submission: &ValidatedSubmission) -> Result<ServiceReply>;
}

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create a client for `base_url`; no timeout beyond reqwest's default.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn analyze_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), ANALYZE_ENDPOINT)
    }

    fn build_form(submission: &ValidatedSubmission) -> Result<Form> {
        let resume = Part::bytes(submission.resume.bytes.clone())
            .file_name(submission.resume.file_name.clone())
            .mime_str(PDF_MIME)
            .context("Failed to create multipart")?;

        Ok(Form::new()
            .part("resume", resume)
            .text("job_description", submission.job_description.clone())
            .text("use_ai", submission.use_ai_flag()))
    }
}

#[async_trait]
impl AnalysisBackend for ServiceClient {
    async fn analyze(&self, submission: &ValidatedSubmission) -> Result<ServiceReply> {
        let url = self.analyze_url();
        let form = Self::build_form(submission)?;

        info!(
            "Calling analysis service: {} (file: {}, use_ai: {})",
            url,
            submission.resume.file_name,
            submission.use_ai_flag()
        );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .context("HTTP request failed")?;

        let status = response.status();
        trace!("Response status: {}", status);

        let response_text = response
            .text()
            .await
            .context("Failed to read response text")?;

        if status.is_success() {
            return ServiceReply::from_body(&response_text).with_context(|| {
                format!(
                    "Failed to parse analysis response. Raw response: {}",
                    response_text
                )
            });
        }

        // A non-2xx reply still counts as a service rejection when it carries
        // an `error` field we can show.
        if let Some(message) = serde_json::from_str::<serde_json::Value>(&response_text)
            .ok()
            .and_then(|value| error_message(&value))
        {
            info!("Analysis service rejected request with {}: {}", status, message);
            return Ok(ServiceReply::Rejected(message));
        }

        error!("Analysis service error response: {}", response_text);
        anyhow::bail!("Service returned error status {}: {}", status, response_text)
    }
}

/// Map a backend outcome onto the three failure kinds.
pub fn into_outcome(reply: Result<ServiceReply>) -> Result<AnalysisResult, SubmissionError> {
    match reply {
        Ok(ServiceReply::Analysis(result)) => Ok(result),
        Ok(ServiceReply::Rejected(message)) => Err(SubmissionError::ServiceReported(message)),
        Err(e) => Err(SubmissionError::Transport(e)),
    }
}
