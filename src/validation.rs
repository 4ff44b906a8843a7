// src/validation.rs
//! Pre-flight checks run at submit time, before any network call

use thiserror::Error;

use crate::input::{ResumeFile, SubmissionInput};

const PDF_SUFFIX: &str = ".pdf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload a resume PDF file.")]
    MissingResume,

    #[error("Please enter the job description.")]
    EmptyJobDescription,

    #[error("Resume file must be a PDF.")]
    NotPdf,
}

/// Payload captured from the input at submit time.
///
/// Later edits to the [`SubmissionInput`] do not reach an in-flight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    pub resume: ResumeFile,
    pub job_description: String,
    pub use_ai: bool,
}

impl ValidatedSubmission {
    /// `use_ai` as sent on the wire
    pub fn use_ai_flag(&self) -> &'static str {
        if self.use_ai {
            "true"
        } else {
            "false"
        }
    }
}

/// Check the input in order; the first failing rule wins.
///
/// The job description is sent as entered; trimming is only used for the
/// emptiness check.
pub fn validate(input: &SubmissionInput) -> Result<ValidatedSubmission, ValidationError> {
    let resume = input
        .resume_file
        .as_ref()
        .ok_or(ValidationError::MissingResume)?;

    if input.job_description.trim().is_empty() {
        return Err(ValidationError::EmptyJobDescription);
    }

    if !has_pdf_suffix(&resume.file_name) {
        return Err(ValidationError::NotPdf);
    }

    Ok(ValidatedSubmission {
        resume: resume.clone(),
        job_description: input.job_description.clone(),
        use_ai: input.use_enhanced_analysis,
    })
}

pub fn has_pdf_suffix(file_name: &str) -> bool {
    file_name.to_lowercase().ends_with(PDF_SUFFIX)
}
