use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use adtruth_common::models::{AnalysisRequest, AnalysisResponse};

use super::error::ApiError;
use super::server::AppState;

/// `POST /analyze`
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let Json(request) = payload?;
    let outcome = state.analysis.analyze(&request).await?;
    Ok(Json(AnalysisResponse::from(outcome)))
}
