//! In-memory ResponseStore.
//!
//! Backs unit tests and `storage.type = memory`. Honors the same natural-key
//! contract as the SQL stores; the write lock makes each upsert atomic.

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::metrics::calculate;
use crate::model::{EsgInput, EsgResponse};
use crate::storage::{now, ResponseStore, Result, StorageError};

/// Natural key: (user_id, financial_year).
type ResponseKey = (String, i32);

/// In-memory response store.
#[derive(Default)]
pub struct MockResponseStore {
    responses: RwLock<HashMap<ResponseKey, EsgResponse>>,
    fail_on_write: RwLock<bool>,
    fail_on_read: RwLock<bool>,
}

impl MockResponseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with a database error.
    pub async fn set_fail_on_write(&self, fail: bool) {
        *self.fail_on_write.write().await = fail;
    }

    /// Make every subsequent read fail with a database error.
    pub async fn set_fail_on_read(&self, fail: bool) {
        *self.fail_on_read.write().await = fail;
    }

    /// Number of stored rows across all users.
    pub async fn len(&self) -> usize {
        self.responses.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.responses.read().await.is_empty()
    }

    async fn check_write(&self) -> Result<()> {
        if *self.fail_on_write.read().await {
            return Err(StorageError::Database("injected write failure".to_string()));
        }
        Ok(())
    }

    async fn check_read(&self) -> Result<()> {
        if *self.fail_on_read.read().await {
            return Err(StorageError::Database("injected read failure".to_string()));
        }
        Ok(())
    }

    /// A user's rows, newest financial year first.
    async fn sorted_for_user(&self, user_id: &str) -> Vec<EsgResponse> {
        let store = self.responses.read().await;
        let mut rows: Vec<EsgResponse> = store
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.financial_year.cmp(&a.financial_year));
        rows
    }
}

#[async_trait]
impl ResponseStore for MockResponseStore {
    async fn init_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn create_or_update(
        &self,
        user_id: &str,
        financial_year: i32,
        input: &EsgInput,
    ) -> Result<EsgResponse> {
        self.check_write().await?;

        let derived = calculate(input);
        let timestamp = now();

        let mut store = self.responses.write().await;
        let record = store
            .entry((user_id.to_string(), financial_year))
            .and_modify(|existing| {
                existing.input = input.clone();
                existing.derived = derived;
                existing.updated_at = timestamp;
            })
            .or_insert_with(|| EsgResponse {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: user_id.to_string(),
                financial_year,
                input: input.clone(),
                derived,
                created_at: timestamp,
                updated_at: timestamp,
            });

        Ok(record.clone())
    }

    async fn get_by_user_id(&self, user_id: &str) -> Result<Vec<EsgResponse>> {
        self.check_read().await?;
        Ok(self.sorted_for_user(user_id).await)
    }

    async fn get_by_user_and_year(
        &self,
        user_id: &str,
        financial_year: i32,
    ) -> Result<Option<EsgResponse>> {
        self.check_read().await?;
        let store = self.responses.read().await;
        Ok(store.get(&(user_id.to_string(), financial_year)).cloned())
    }

    async fn delete(&self, user_id: &str, financial_year: i32) -> Result<()> {
        self.check_write().await?;
        let mut store = self.responses.write().await;
        match store.remove(&(user_id.to_string(), financial_year)) {
            Some(_) => Ok(()),
            None => Err(StorageError::NotFound {
                user_id: user_id.to_string(),
                financial_year,
            }),
        }
    }

    async fn get_financial_years(&self, user_id: &str) -> Result<Vec<i32>> {
        self.check_read().await?;
        Ok(self
            .sorted_for_user(user_id)
            .await
            .into_iter()
            .map(|r| r.financial_year)
            .collect())
    }
}
