//! HTTP mapping for analysis failures.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use adtruth_common::models::ErrorResponse;

use crate::Error;

/// Errors the `/analyze` handler can answer with.
#[derive(Debug)]
pub enum ApiError {
    /// Caller sent something unusable. 400.
    BadRequest(String),
    /// A collaborator failed. 500, with the failure's description.
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(m) | ApiError::Internal(m) => m,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        if err.is_client_error() {
            ApiError::BadRequest(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Analysis failed: {}", self.message());
        }
        (status, Json(ErrorResponse::new(self.message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_map_to_status_codes() {
        let client = ApiError::from(Error::InvalidInput("No ad text provided".into()));
        assert_eq!(client.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(client.message(), "No ad text provided");

        let upstream = ApiError::from(Error::Ai("Cohere API error: timeout".into()));
        assert_eq!(upstream.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(upstream.message(), "Cohere API error: timeout");
    }
}
