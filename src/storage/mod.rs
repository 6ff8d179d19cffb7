//! Storage implementations.
//!
//! One trait, [`ResponseStore`], with SQL backends generated from a shared
//! implementation and an in-memory store for tests.

use std::sync::Arc;

use tracing::{error, info};

use crate::config::{StorageConfig, StorageType};

pub mod mock;
mod response_store;
#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub mod schema;
#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub mod sql;

pub use mock::MockResponseStore;
pub use response_store::ResponseStore;

#[cfg(feature = "postgres")]
pub use sql::postgres::PostgresResponseStore;
#[cfg(feature = "sqlite")]
pub use sql::sqlite::SqliteResponseStore;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("ESG response not found: user={user_id}, financial_year={financial_year}")]
    NotFound {
        user_id: String,
        financial_year: i32,
    },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid timestamp in column {column}: {value}")]
    InvalidTimestamp { column: &'static str, value: String },
}

#[cfg(any(feature = "sqlite", feature = "postgres"))]
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}

/// Parse an RFC 3339 timestamp column.
pub(crate) fn parse_timestamp(
    column: &'static str,
    value: &str,
) -> Result<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&chrono::Utc))
        .map_err(|_| StorageError::InvalidTimestamp {
            column,
            value: value.to_string(),
        })
}

/// Format a timestamp for storage.
///
/// Microsecond precision keeps SQLite and Postgres text columns identical.
pub(crate) fn format_timestamp(ts: &chrono::DateTime<chrono::Utc>) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

/// Current time truncated to the precision `format_timestamp` keeps, so a
/// returned record compares equal to its stored form.
pub(crate) fn now() -> chrono::DateTime<chrono::Utc> {
    use chrono::DurationRound;

    let now = chrono::Utc::now();
    now.duration_trunc(chrono::Duration::microseconds(1))
        .unwrap_or(now)
}

/// Initialize the response store based on configuration.
///
/// Connects, creates the schema, and returns the store behind the trait.
pub async fn init_storage(
    config: &StorageConfig,
) -> std::result::Result<Arc<dyn ResponseStore>, Box<dyn std::error::Error>> {
    let store: Arc<dyn ResponseStore> = match config.storage_type {
        StorageType::Memory => {
            info!("storage: in-memory");
            Arc::new(MockResponseStore::new())
        }
        #[cfg(feature = "sqlite")]
        StorageType::Sqlite => {
            use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

            let path = &config.sqlite.path;
            info!(path = %path, "storage: sqlite");

            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }

            let opts = SqliteConnectOptions::new()
                .filename(path)
                .journal_mode(SqliteJournalMode::Wal)
                .busy_timeout(std::time::Duration::from_secs(config.sqlite.busy_timeout_secs))
                .create_if_missing(true);

            let pool = SqlitePoolOptions::new()
                .max_connections(config.sqlite.max_connections)
                .connect_with(opts)
                .await?;

            Arc::new(SqliteResponseStore::new(pool))
        }
        #[cfg(feature = "postgres")]
        StorageType::Postgres => {
            use sqlx::postgres::PgPoolOptions;

            let uri = config.postgres.uri.clone();
            let max_connections = config.postgres.max_connections;
            info!("storage: postgres");

            let pool = crate::utils::bootstrap::connect_with_retry("postgres", &uri, || {
                PgPoolOptions::new()
                    .max_connections(max_connections)
                    .connect(&uri)
            })
            .await?;

            Arc::new(PostgresResponseStore::new(pool))
        }
        #[allow(unreachable_patterns)]
        other => {
            error!(storage = ?other, "storage backend not enabled in this build");
            return Err(format!("storage backend {:?} not enabled in this build", other).into());
        }
    };

    store.init_schema().await?;
    Ok(store)
}
