// src/presenter.rs
//! Result presenter: pure mapping from a finished request to what gets shown

use serde::Serialize;
use std::fmt::Write;

use crate::controller::RequestState;
use crate::types::AnalysisResult;

const HIGH_THRESHOLD: f64 = 70.0;
const MEDIUM_THRESHOLD: f64 = 40.0;

const GAUGE_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    High,
    Medium,
    Low,
}

impl ScoreCategory {
    pub fn color(&self) -> &'static str {
        match self {
            Self::High => "#4caf50",
            Self::Medium => "#ff9800",
            Self::Low => "#f44336",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// `> 70` is High, `(40, 70]` is Medium, everything else Low.
pub fn categorize(score: f64) -> ScoreCategory {
    if score > HIGH_THRESHOLD {
        ScoreCategory::High
    } else if score > MEDIUM_THRESHOLD {
        ScoreCategory::Medium
    } else {
        ScoreCategory::Low
    }
}

/// One row of the matched/missing table. A column is `None` once its list
/// is exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordRow {
    pub matched: Option<String>,
    pub missing: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreIndicator {
    pub percent: i64,
    pub category: ScoreCategory,
    pub color: &'static str,
    /// Gauge fill in [0, 1]. The shown percent is not clamped.
    pub fill: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub score: ScoreIndicator,
    pub summary_lines: Vec<String>,
}

impl ReportView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let category = categorize(result.match_score);

        Self {
            matched_keywords: result.matched_keywords.clone(),
            missing_keywords: result.missing_keywords.clone(),
            score: ScoreIndicator {
                percent: result.match_score.round() as i64,
                category,
                color: category.color(),
                fill: (result.match_score / 100.0).clamp(0.0, 1.0),
            },
            summary_lines: summary_lines(&result.summary_text),
        }
    }

    /// Pair both keyword lists up, row by row, in service order.
    pub fn keyword_rows(&self) -> Vec<KeywordRow> {
        let rows = self.matched_keywords.len().max(self.missing_keywords.len());
        (0..rows)
            .map(|i| KeywordRow {
                matched: self.matched_keywords.get(i).cloned(),
                missing: self.missing_keywords.get(i).cloned(),
            })
            .collect()
    }
}

/// Split on line breaks, keeping blank lines. Text is never interpreted.
pub fn summary_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// What a view shows for a given state. Failures never carry a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Presentation {
    Idle,
    Busy,
    Report(ReportView),
    Error { message: String },
}

pub fn present(state: &RequestState) -> Presentation {
    match state {
        RequestState::Idle => Presentation::Idle,
        RequestState::Validating | RequestState::InFlight => Presentation::Busy,
        RequestState::Succeeded(result) => Presentation::Report(ReportView::from_result(result)),
        RequestState::Failed(message) => Presentation::Error {
            message: message.clone(),
        },
    }
}

/// Plain-text rendering of a report for the terminal.
pub fn render_report(view: &ReportView) -> String {
    let mut out = String::new();
    let rows = view.keyword_rows();

    let left_width = rows
        .iter()
        .filter_map(|r| r.matched.as_deref())
        .map(|s| s.chars().count())
        .chain(std::iter::once("Matched Skills".len()))
        .max()
        .unwrap_or(0);

    let _ = writeln!(out, "Skill Match Results");
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<left_width$} | Missing Skills", "Matched Skills");
    let _ = writeln!(out, "{}-+-{}", "-".repeat(left_width), "-".repeat(14));
    for row in &rows {
        let _ = writeln!(
            out,
            "{:<left_width$} | {}",
            row.matched.as_deref().unwrap_or(""),
            row.missing.as_deref().unwrap_or("")
        );
    }
    let _ = writeln!(out);

    let filled = (view.score.fill * GAUGE_WIDTH as f64).round() as usize;
    let _ = writeln!(
        out,
        "Match Score: {}% [{}{}] {} ({})",
        view.score.percent,
        "#".repeat(filled),
        ".".repeat(GAUGE_WIDTH - filled),
        view.score.category.label(),
        view.score.color
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Match Summary");
    for line in &view.summary_lines {
        let _ = writeln!(out, "{}", line);
    }

    out
}

/// Plain-text rendering of any state.
pub fn render_state(state: &RequestState) -> String {
    match present(state) {
        Presentation::Idle => String::new(),
        Presentation::Busy => "Analyzing...\n".to_string(),
        Presentation::Report(view) => render_report(&view),
        Presentation::Error { message } => format!("{}\n", message),
    }
}
