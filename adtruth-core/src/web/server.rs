use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::post;
use axum::Router;
use axum_server::Handle;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::services::AnalysisService;
use crate::Error;

use super::handlers;

/// Shared state for the axum routes.
#[derive(Clone)]
pub struct AppState {
    pub analysis: Arc<AnalysisService>,
}

impl AppState {
    pub fn new(analysis: AnalysisService) -> Self {
        Self {
            analysis: Arc::new(analysis),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/analyze", post(handlers::analyze))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// Serves `app` on `addr` until `handle` is told to shut down.
pub async fn serve(addr: SocketAddr, app: Router, handle: Handle) -> Result<(), Error> {
    info!("Analysis server listening on http://{}", addr);

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    info!("Analysis server shut down.");
    Ok(())
}
