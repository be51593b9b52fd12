// File: src/services/fact_check.rs

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::http::HttpClient;

pub const DEFAULT_FACT_CHECK_ENDPOINT: &str =
    "https://factchecktools.googleapis.com/v1alpha1/claims:search";

pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Why a lookup produced no reference. Only ever logged; callers see "no reference".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoResultReason {
    MissingCredential,
    RequestFailed(String),
    NonJsonResponse(Option<String>),
    MalformedBody(String),
    NoReview,
}

impl fmt::Display for NoResultReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoResultReason::MissingCredential => f.write_str("fact-check credential is not configured"),
            NoResultReason::RequestFailed(e) => write!(f, "request failed: {}", e),
            NoResultReason::NonJsonResponse(ct) => write!(
                f,
                "non-JSON response (content type: {})",
                ct.as_deref().unwrap_or("none")
            ),
            NoResultReason::MalformedBody(e) => write!(f, "malformed response body: {}", e),
            NoResultReason::NoReview => f.write_str("no claim review found"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(String),
    NoResult(NoResultReason),
}

impl LookupOutcome {
    /// A blank url counts as no reference.
    pub fn reference_url(&self) -> Option<&str> {
        match self {
            LookupOutcome::Found(url) if !url.trim().is_empty() => Some(url),
            _ => None,
        }
    }

    pub fn into_reference_url(self) -> Option<String> {
        match self {
            LookupOutcome::Found(url) if !url.trim().is_empty() => Some(url),
            _ => None,
        }
    }
}

/// Finds a published fact-check for a claim. Never fails; every problem
/// becomes [`LookupOutcome::NoResult`].
#[async_trait]
pub trait FactCheckLookup: Send + Sync {
    async fn lookup(&self, claim: &str) -> LookupOutcome;
}

#[derive(Clone)]
pub struct FactCheckConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub timeout: Duration,
}

impl FactCheckConfig {
    pub fn with_api_key(api_key: Option<String>) -> Self {
        Self {
            api_key,
            ..Self::default()
        }
    }
}

impl fmt::Debug for FactCheckConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactCheckConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for FactCheckConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_FACT_CHECK_ENDPOINT.to_string(),
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ClaimSearchResponse {
    #[serde(default)]
    claims: Vec<ClaimEntry>,
}

#[derive(Debug, Deserialize)]
struct ClaimEntry {
    #[serde(default, rename = "claimReview")]
    claim_review: Vec<ClaimReview>,
}

#[derive(Debug, Deserialize)]
struct ClaimReview {
    url: Option<String>,
}

/// Google Fact Check Tools `claims:search` client.
pub struct GoogleFactCheckClient {
    http: Arc<dyn HttpClient>,
    config: FactCheckConfig,
}

impl GoogleFactCheckClient {
    pub fn new(http: Arc<dyn HttpClient>, config: FactCheckConfig) -> Self {
        Self { http, config }
    }

    pub fn search_url(&self, claim: &str, api_key: &str) -> String {
        format!(
            "{}?query={}&key={}",
            self.config.endpoint,
            urlencoding::encode(claim),
            urlencoding::encode(api_key)
        )
    }

    /// Url of the first review on the first claim that has any reviews.
    fn first_review_url(body: &str) -> LookupOutcome {
        let parsed: ClaimSearchResponse = match serde_json::from_str(body) {
            Ok(parsed) => parsed,
            Err(e) => return LookupOutcome::NoResult(NoResultReason::MalformedBody(e.to_string())),
        };

        match parsed.claims.into_iter().find(|c| !c.claim_review.is_empty()) {
            Some(claim) => match claim
                .claim_review
                .into_iter()
                .next()
                .and_then(|r| r.url)
                .filter(|url| !url.trim().is_empty())
            {
                Some(url) => LookupOutcome::Found(url),
                None => LookupOutcome::NoResult(NoResultReason::MalformedBody(
                    "claim review without url".to_string(),
                )),
            },
            None => LookupOutcome::NoResult(NoResultReason::NoReview),
        }
    }
}

#[async_trait]
impl FactCheckLookup for GoogleFactCheckClient {
    async fn lookup(&self, claim: &str) -> LookupOutcome {
        let api_key = match self.config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key,
            _ => {
                warn!("GOOGLE_FACT_CHECK_API_KEY is not set; skipping fact-check lookup");
                return LookupOutcome::NoResult(NoResultReason::MissingCredential);
            }
        };

        let url = self.search_url(claim, api_key);
        debug!("Querying fact-check service at {}", self.config.endpoint);

        let outcome = match self.http.get(url, self.config.timeout).await {
            Err(e) => LookupOutcome::NoResult(NoResultReason::RequestFailed(e.to_string())),
            Ok(response) if !response.is_json() => {
                LookupOutcome::NoResult(NoResultReason::NonJsonResponse(response.content_type))
            }
            Ok(response) => {
                debug!("Fact-check raw response (HTTP {}): {}", response.status, response.body);
                Self::first_review_url(&response.body)
            }
        };

        match &outcome {
            LookupOutcome::Found(url) => info!(reference_url = %url, "fact-check reference found"),
            LookupOutcome::NoResult(NoResultReason::NoReview) => info!("no fact-check reference for claim"),
            LookupOutcome::NoResult(reason) => warn!("Fact-check lookup failed: {}", reason),
        }
        outcome
    }
}
