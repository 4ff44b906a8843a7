use anyhow::Result;
use std::path::Path;

pub mod config;
pub mod controller;
pub mod core;
pub mod errors;
pub mod input;
pub mod presenter;
pub mod types;
pub mod utils;
pub mod validation;

pub use config::ClientConfig;
pub use controller::{RequestState, SubmissionController};
pub use input::{InputCollector, ResumeFile, SubmissionInput};
pub use presenter::{categorize, ReportView, ScoreCategory};
pub use types::AnalysisResult;

/// Convenience function for a one-shot analysis against `base_url`.
///
/// Without a resume path the submission fails validation like it would in
/// the interactive flow; an unreadable path is an error.
pub async fn analyze_resume(
    base_url: &str,
    resume_path: Option<&Path>,
    job_description: &str,
    use_ai: bool,
) -> Result<RequestState> {
    let mut collector = InputCollector::new();

    if let Some(path) = resume_path {
        collector.set_resume_file(Some(ResumeFile::from_path(path).await?));
    }
    collector.set_job_description(job_description);
    collector.set_use_enhanced_analysis(use_ai);

    let mut controller = SubmissionController::new(crate::core::ServiceClient::new(base_url)?);
    let state = controller.submit(collector.input()).await?;
    Ok(state)
}
