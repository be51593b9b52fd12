// src/repositories/sqlite/analysis_log.rs
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Connection, Row};
use tracing::info;

use adtruth_common::models::{AnalysisRecord, NewAnalysisRecord, TrustScore, Verdict};
use adtruth_common::traits::repository_traits::AnalysisLogRepository;

use crate::db::Database;
use crate::Error;

const CREATE_ANALYSIS_LOG: &str = r#"
    CREATE TABLE IF NOT EXISTS analysis_log (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        ad_text TEXT,
        verdict TEXT,
        trust_score INTEGER,
        reference_url TEXT,
        timestamp DATETIME
    )
"#;

/// Analysis log stored in a single SQLite table.
///
/// Each call opens its own connection, creates the table if it is missing,
/// does its work and closes the connection again.
#[derive(Clone)]
pub struct SqliteAnalysisLogRepository {
    db: Database,
}

impl SqliteAnalysisLogRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    async fn ensure_schema(conn: &mut SqliteConnection) -> Result<(), Error> {
        sqlx::query(CREATE_ANALYSIS_LOG).execute(&mut *conn).await?;
        Ok(())
    }

    fn row_to_record(row: &SqliteRow) -> Result<AnalysisRecord, Error> {
        let verdict: String = row.try_get("verdict")?;
        let trust_score: i64 = row.try_get("trust_score")?;
        let timestamp: NaiveDateTime = row.try_get("timestamp")?;

        Ok(AnalysisRecord {
            id: row.try_get("id")?,
            ad_text: row.try_get("ad_text")?,
            verdict: verdict.parse::<Verdict>()?,
            trust_score: TrustScore::try_from(trust_score)?,
            reference_url: row.try_get("reference_url")?,
            timestamp,
        })
    }
}

#[async_trait]
impl AnalysisLogRepository for SqliteAnalysisLogRepository {
    async fn log_result(&self, record: &NewAnalysisRecord) -> Result<AnalysisRecord, Error> {
        let mut conn = self.db.connect().await?;
        Self::ensure_schema(&mut conn).await?;

        let timestamp = Utc::now().naive_utc();
        let result = sqlx::query(
            r#"
            INSERT INTO analysis_log (ad_text, verdict, trust_score, reference_url, timestamp)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
            .bind(&record.ad_text)
            .bind(record.verdict.as_str())
            .bind(i64::from(record.trust_score))
            .bind(&record.reference_url)
            .bind(timestamp)
            .execute(&mut conn)
            .await?;

        conn.close().await?;

        let id = result.last_insert_rowid();
        info!(id, verdict = %record.verdict, "analysis logged");

        Ok(AnalysisRecord {
            id,
            ad_text: record.ad_text.clone(),
            verdict: record.verdict,
            trust_score: record.trust_score,
            reference_url: record.reference_url.clone(),
            timestamp,
        })
    }

    async fn list_results(&self) -> Result<Vec<AnalysisRecord>, Error> {
        let mut conn = self.db.connect().await?;
        Self::ensure_schema(&mut conn).await?;

        let rows = sqlx::query(
            r#"
            SELECT id, ad_text, verdict, trust_score, reference_url, timestamp
            FROM analysis_log
            ORDER BY id
            "#,
        )
            .fetch_all(&mut conn)
            .await?;

        conn.close().await?;

        rows.iter().map(Self::row_to_record).collect()
    }
}
