// src/input.rs
//! Input collector: the user-entered state for one analysis session

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

/// A resume picked by the user. Bytes are read eagerly so the payload can be
/// captured at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Load a resume from disk, keeping only the final path component as name
    pub async fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .with_context(|| format!("Invalid resume file name: {}", path.display()))?;

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(Self { file_name, bytes })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionInput {
    pub resume_file: Option<ResumeFile>,
    pub job_description: String,
    pub use_enhanced_analysis: bool,
}

/// Holds [`SubmissionInput`] and counts edits so a view knows when to redraw.
///
/// Setters never validate; that happens when the controller submits.
#[derive(Debug, Default)]
pub struct InputCollector {
    input: SubmissionInput,
    revision: u64,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &SubmissionInput {
        &self.input
    }

    /// Bumped on every setter call.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_resume_file(&mut self, file: Option<ResumeFile>) {
        self.input.resume_file = file;
        self.touch("resume_file");
    }

    pub fn clear_resume_file(&mut self) {
        self.set_resume_file(None);
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.input.job_description = text.into();
        self.touch("job_description");
    }

    pub fn set_use_enhanced_analysis(&mut self, enabled: bool) {
        self.input.use_enhanced_analysis = enabled;
        self.touch("use_enhanced_analysis");
    }

    pub fn toggle_enhanced_analysis(&mut self) {
        let enabled = !self.input.use_enhanced_analysis;
        self.set_use_enhanced_analysis(enabled);
    }

    fn touch(&mut self, field: &'static str) {
        self.revision += 1;
        debug!(field, revision = self.revision, "Input changed");
    }
}
