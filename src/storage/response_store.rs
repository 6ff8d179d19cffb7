//! ResponseStore trait definition.

use async_trait::async_trait;

use super::Result;
use crate::model::{EsgInput, EsgResponse};

/// Interface for questionnaire response persistence.
///
/// The `(user_id, financial_year)` pair is the natural key: every backend
/// enforces it with a unique constraint and `create_or_update` relies on it
/// for at-most-one-row semantics. Concurrent upserts to the same key are
/// resolved by the backend (last writer wins).
///
/// Implementations:
/// - `SqliteResponseStore`: SQLite storage
/// - `PostgresResponseStore`: PostgreSQL storage
/// - `MockResponseStore`: In-memory store for tests and local runs
#[async_trait]
pub trait ResponseStore: Send + Sync + 'static {
    /// Create tables and indexes if they don't exist.
    async fn init_schema(&self) -> Result<()>;

    /// Upsert the response for `(user_id, financial_year)`.
    ///
    /// Derived metrics are computed from `input`. On update every raw and
    /// derived field is overwritten and `updated_at` refreshed; `id` and
    /// `created_at` are preserved. Returns the stored record.
    async fn create_or_update(
        &self,
        user_id: &str,
        financial_year: i32,
        input: &EsgInput,
    ) -> Result<EsgResponse>;

    /// All responses for a user, newest financial year first.
    async fn get_by_user_id(&self, user_id: &str) -> Result<Vec<EsgResponse>>;

    /// The response for one financial year, if any.
    async fn get_by_user_and_year(
        &self,
        user_id: &str,
        financial_year: i32,
    ) -> Result<Option<EsgResponse>>;

    /// Hard-delete the response for one financial year.
    ///
    /// Returns `StorageError::NotFound` when no row matched.
    async fn delete(&self, user_id: &str, financial_year: i32) -> Result<()>;

    /// Financial years the user has filed, newest first.
    async fn get_financial_years(&self, user_id: &str) -> Result<Vec<i32>>;

    /// Release backend connections. Called once on shutdown.
    async fn close(&self) {}
}
