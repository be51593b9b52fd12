use std::sync::Arc;

use tracing::info;

use adtruth_ai::{Provider, VerdictClassifier};
use adtruth_common::models::{AnalysisOutcome, AnalysisRequest, NewAnalysisRecord, NO_AD_TEXT_MESSAGE};
use adtruth_common::traits::repository_traits::AnalysisLogRepository;

use crate::config::AppConfig;
use crate::db::Database;
use crate::http::DefaultHttpClient;
use crate::repositories::SqliteAnalysisLogRepository;
use crate::services::fact_check::{FactCheckLookup, GoogleFactCheckClient};
use crate::Error;

/// Classify, look up, log. One instance is shared by every request.
pub struct AnalysisService {
    classifier: VerdictClassifier,
    fact_checker: Arc<dyn FactCheckLookup>,
    log_repo: Arc<dyn AnalysisLogRepository>,
}

impl AnalysisService {
    pub fn new(
        classifier: VerdictClassifier,
        fact_checker: Arc<dyn FactCheckLookup>,
        log_repo: Arc<dyn AnalysisLogRepository>,
    ) -> Self {
        Self {
            classifier,
            fact_checker,
            log_repo,
        }
    }

    /// Production wiring: configured model provider, Google fact-check lookup
    /// over reqwest, SQLite log at `config.database_path`.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let classifier = VerdictClassifier::new(Provider::from_config(config.ai.clone()));
        let fact_checker = GoogleFactCheckClient::new(
            Arc::new(DefaultHttpClient::new()),
            config.fact_check.clone(),
        );
        let log_repo = SqliteAnalysisLogRepository::new(Database::new(&config.database_path)?);

        Ok(Self::new(classifier, Arc::new(fact_checker), Arc::new(log_repo)))
    }

    /// Runs one analysis.
    ///
    /// Blank input fails with [`Error::InvalidInput`] before any collaborator
    /// is touched. A classifier or store failure is returned as-is; lookup
    /// problems only ever mean "no reference".
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisOutcome, Error> {
        let ad_text = request
            .claim_text()
            .ok_or_else(|| Error::InvalidInput(NO_AD_TEXT_MESSAGE.to_string()))?;

        let classification = self.classifier.classify(ad_text).await?;
        let reference_url = self.fact_checker.lookup(ad_text).await.into_reference_url();

        let record = self
            .log_repo
            .log_result(&NewAnalysisRecord {
                ad_text: ad_text.to_string(),
                verdict: classification.verdict,
                trust_score: classification.trust_score,
                reference_url,
            })
            .await?;

        info!(
            record_id = record.id,
            verdict = %record.verdict,
            has_reference = record.reference_url.is_some(),
            "analysis complete"
        );

        Ok(AnalysisOutcome {
            record_id: record.id,
            verdict: record.verdict,
            trust_score: record.trust_score,
            reference_url: record.reference_url,
        })
    }
}
