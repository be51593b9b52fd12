//! HTTP client abstraction for outbound lookups
//!
//! Services that call third-party HTTP APIs take an `Arc<dyn HttpClient>`
//! instead of a concrete `reqwest::Client`, so tests can substitute canned
//! responses without touching the network.
//!
//! # Example Usage:
//! ``
//! use crate::http::{HttpClient, DefaultHttpClient};
//!
//! // In production code
//! let lookup = GoogleFactCheckClient::new(Arc::new(DefaultHttpClient::new()), config);
//!
//! // In tests, can use a mock implementation
//! let lookup = GoogleFactCheckClient::new(Arc::new(MockHttpClient::new()), config);
//! ``

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::Error;

/// The parts of a response the lookups care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    /// True when the declared content type mentions `application/json`.
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
    }
}

/// A generic trait for making HTTP requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET `url`, giving up after `timeout`. Non-2xx statuses are returned, not raised.
    async fn get(&self, url: String, timeout: Duration) -> Result<HttpResponse, Error>;
}

#[derive(Clone, Default)]
pub struct DefaultHttpClient {
    client: reqwest::Client,
}

impl DefaultHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HttpClient for DefaultHttpClient {
    async fn get(&self, url: String, timeout: Duration) -> Result<HttpResponse, Error> {
        let response = self.client
            .get(&url)
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let body = response.text().await?;

        Ok(HttpResponse { status, content_type, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with(content_type: Option<&str>) -> HttpResponse {
        HttpResponse {
            status: 200,
            content_type: content_type.map(|s| s.to_string()),
            body: String::new(),
        }
    }

    #[test]
    fn json_detection() {
        assert!(response_with(Some("application/json; charset=UTF-8")).is_json());
        assert!(response_with(Some("Application/JSON")).is_json());
        assert!(!response_with(Some("text/html")).is_json());
        assert!(!response_with(None).is_json());
    }
}
