use std::path::{Path, PathBuf};
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::ConnectOptions;
use tracing::debug;

use crate::Error;

/// Handle to the SQLite file backing the analysis log.
///
/// Holds no open connection. Every call to [`Database::connect`] opens a fresh
/// one, so nothing is shared between requests and concurrent writers are
/// serialized by SQLite's own file locking.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl Database {
    pub fn new(database_path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = database_path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        Ok(Self { path, options })
    }

    pub async fn connect(&self) -> Result<SqliteConnection, Error> {
        debug!("Opening SQLite connection to {}", self.path.display());
        let conn = self.options.connect().await?;
        Ok(conn)
    }
}
