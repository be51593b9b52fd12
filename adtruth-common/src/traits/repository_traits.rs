use async_trait::async_trait;

use crate::error::Error;
use crate::models::{AnalysisRecord, NewAnalysisRecord};

/// Append-only log of analysis results.
///
/// Implementations create their backing storage lazily; callers never
/// need to run a setup step first.
#[async_trait]
pub trait AnalysisLogRepository: Send + Sync {
    /// Appends one record, stamping it with an id and the current time.
    async fn log_result(&self, record: &NewAnalysisRecord) -> Result<AnalysisRecord, Error>;

    /// Every record, oldest first.
    async fn list_results(&self) -> Result<Vec<AnalysisRecord>, Error>;
}
