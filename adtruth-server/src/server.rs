//! adtruth-server/src/server.rs
//!
//! Run modes: the HTTP analysis server and the history dump.

use std::time::Duration;

use axum_server::Handle;
use tracing::{error, info};

use adtruth_common::traits::repository_traits::AnalysisLogRepository;
use adtruth_core::repositories::SqliteAnalysisLogRepository;
use adtruth_core::services::AnalysisService;
use adtruth_core::web::{self, AppState};
use adtruth_core::{AppConfig, Database, Error};

pub async fn run_server(config: AppConfig) -> Result<(), Error> {
    if config.fact_check.api_key.is_none() {
        info!("GOOGLE_FACT_CHECK_API_KEY not set; reference lookups will report \"Not found\".");
    }

    let analysis = AnalysisService::from_config(&config)?;
    let app = web::router(AppState::new(analysis));

    let handle = Handle::new();
    let shutdown_handle = handle.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {:?}", e);
            return;
        }
        info!("Ctrl-C detected, shutting down...");
        shutdown_handle.graceful_shutdown(Some(Duration::from_secs(10)));
    });

    web::serve(config.bind_addr(), app, handle).await
}

/// Prints every logged analysis, one JSON object per line.
pub async fn run_history(config: AppConfig) -> Result<(), Error> {
    let repo = SqliteAnalysisLogRepository::new(Database::new(&config.database_path)?);
    let records = repo.list_results().await?;

    println!("Records in the database:");
    for record in &records {
        println!("{}", serde_json::to_string(record)?);
    }
    info!("{} record(s) in {}", records.len(), config.database_path.display());
    Ok(())
}
