// src/types/response.rs
//! Wire types for the analysis service `/analyze/` endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ===== Service Response Types =====

/// Completed skill-match analysis as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub match_score: f64,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    #[serde(rename = "ai_summary")]
    pub summary_text: String,
}

/// What a parsed response body turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceReply {
    Analysis(AnalysisResult),
    /// The service ran but declined to produce a result (e.g. unreadable PDF).
    Rejected(String),
}

impl ServiceReply {
    /// Interpret a raw JSON body.
    ///
    /// A body carrying a truthy `error` field is a service rejection, whatever
    /// else it contains. Anything else must deserialize as [`AnalysisResult`].
    pub fn from_body(body: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(body)?;

        if let Some(message) = error_message(&value) {
            return Ok(Self::Rejected(message));
        }

        let analysis: AnalysisResult = serde_json::from_value(value)?;
        Ok(Self::Analysis(analysis))
    }
}

/// Extract the `error` field when it is present and truthy.
///
/// `null`, `false`, `0` and `""` are treated as absent.
pub(crate) fn error_message(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
