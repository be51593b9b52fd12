// File: adtruth-common/src/models/analysis.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::verdict::{TrustScore, Verdict};

/// Message returned when the request carries no usable claim text.
pub const NO_AD_TEXT_MESSAGE: &str = "No ad text provided";

/// Sentinel reported to callers in place of a missing reference URL.
pub const REFERENCE_NOT_FOUND: &str = "Not found";

/// Body of `POST /analyze`. A missing `text` behaves like an empty one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub text: Option<String>,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()) }
    }

    /// Trimmed claim text, or `None` when it is missing or blank.
    pub fn claim_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// What the classifier concluded about a claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub verdict: Verdict,
    pub trust_score: TrustScore,
    /// Model reply exactly as received, kept for logging.
    pub raw_reply: String,
}

impl Classification {
    pub fn new(verdict: Verdict, raw_reply: impl Into<String>) -> Self {
        Self {
            verdict,
            trust_score: verdict.trust_score(),
            raw_reply: raw_reply.into(),
        }
    }
}

/// Row to append to the analysis log. `id` and `timestamp` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnalysisRecord {
    pub ad_text: String,
    pub verdict: Verdict,
    pub trust_score: TrustScore,
    pub reference_url: Option<String>,
}

/// A persisted analysis result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRecord {
    pub id: i64,
    pub ad_text: String,
    pub verdict: Verdict,
    pub trust_score: TrustScore,
    pub reference_url: Option<String>,
    pub timestamp: NaiveDateTime,
}

/// Result of a successful analysis, before it is shaped into an HTTP body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOutcome {
    pub record_id: i64,
    pub verdict: Verdict,
    pub trust_score: TrustScore,
    pub reference_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// 200 body of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub status: ResponseStatus,
    pub verdict: Verdict,
    pub trust_score: TrustScore,
    pub reference_url: String,
}

impl From<AnalysisOutcome> for AnalysisResponse {
    fn from(outcome: AnalysisOutcome) -> Self {
        Self {
            status: ResponseStatus::Success,
            verdict: outcome.verdict,
            trust_score: outcome.trust_score,
            reference_url: outcome
                .reference_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| REFERENCE_NOT_FOUND.to_string()),
        }
    }
}

/// 4xx/5xx body of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: ResponseStatus,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
        }
    }
}
