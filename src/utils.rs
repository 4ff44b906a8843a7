// src/utils.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::presenter::ReportView;

/// A finished report as written by `--save`.
#[derive(Debug, Serialize)]
pub struct SavedReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub resume_file: &'a str,
    pub use_ai: bool,
    pub report: &'a ReportView,
}

/// Normalize a resume file name for use inside another file name
pub fn normalize_file_stem(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("resume");

    let normalized: String = stem
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if normalized.is_empty() {
        "resume".to_string()
    } else {
        normalized
    }
}

/// Build report output path
pub fn report_file_path(base: &Path, resume_file: &str, at: DateTime<Utc>) -> PathBuf {
    base.join(format!(
        "skillmatch_{}_{}.json",
        normalize_file_stem(resume_file),
        at.format("%Y%m%d_%H%M%S")
    ))
}

/// Ensure directory exists
pub async fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        tokio::fs::create_dir_all(path)
            .await
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Write file content with proper error context
pub async fn write_file_content(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent).await?;
    }

    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Serialize a report into `dir` and return the file written
pub async fn save_report(dir: &Path, report: &SavedReport<'_>) -> Result<PathBuf> {
    let path = report_file_path(dir, report.resume_file, report.generated_at);
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;

    write_file_content(&path, &json).await?;
    info!("Saved report to {}", path.display());
    Ok(path)
}
