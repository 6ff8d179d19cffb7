//! Questionnaire response service.
//!
//! Sits between the HTTP layer and the store: validates and cleans
//! submissions, delegates persistence, and turns "no row" into a distinct
//! not-found outcome.


use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info};

use crate::model::EsgResponse;
use crate::storage::{ResponseStore, StorageError};
use crate::validation::{clean_submission, current_year, Submission, ValidationError};

use super::summary::{summarize, Summary};

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors from service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("ESG response not found for the specified year")]
    NotFound { user_id: String, financial_year: i32 },

    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound {
                user_id,
                financial_year,
            } => ServiceError::NotFound {
                user_id,
                financial_year,
            },
            other => ServiceError::Storage(other),
        }
    }
}

/// Response service over an injected store.
#[derive(Clone)]
pub struct ResponseService {
    store: Arc<dyn ResponseStore>,
}

impl ResponseService {
    pub fn new(store: Arc<dyn ResponseStore>) -> Self {
        Self { store }
    }

    /// Validate a raw submission body and save it.
    pub async fn save(&self, user_id: &str, body: &Value) -> Result<EsgResponse> {
        let submission = clean_submission(body, current_year())?;
        self.save_submission(user_id, &submission).await
    }

    /// Save an already-validated submission.
    pub async fn save_submission(
        &self,
        user_id: &str,
        submission: &Submission,
    ) -> Result<EsgResponse> {
        let financial_year = submission.financial_year;

        let response = self
            .store
            .create_or_update(user_id, financial_year, &submission.input)
            .await
            .map_err(|e| {
                error!(user_id = %user_id, financial_year, error = %e, "failed to save ESG response");
                e
            })?;

        info!(
            user_id = %user_id,
            financial_year,
            response_id = %response.id,
            "ESG response saved"
        );
        Ok(response)
    }

    /// All of a user's responses, newest financial year first.
    pub async fn list(&self, user_id: &str) -> Result<Vec<EsgResponse>> {
        let responses = self.store.get_by_user_id(user_id).await?;
        debug!(user_id = %user_id, count = responses.len(), "listed ESG responses");
        Ok(responses)
    }

    /// One financial year's response; `NotFound` when absent.
    pub async fn get(&self, user_id: &str, financial_year: i32) -> Result<EsgResponse> {
        self.store
            .get_by_user_and_year(user_id, financial_year)
            .await?
            .ok_or_else(|| ServiceError::NotFound {
                user_id: user_id.to_string(),
                financial_year,
            })
    }

    /// Delete one financial year's response; `NotFound` when absent.
    pub async fn delete(&self, user_id: &str, financial_year: i32) -> Result<()> {
        self.store.delete(user_id, financial_year).await?;
        info!(user_id = %user_id, financial_year, "ESG response deleted");
        Ok(())
    }

    /// Years the user has filed, newest first.
    pub async fn financial_years(&self, user_id: &str) -> Result<Vec<i32>> {
        Ok(self.store.get_financial_years(user_id).await?)
    }

    /// Dashboard summary across all of a user's responses.
    pub async fn summary(&self, user_id: &str) -> Result<Summary> {
        let responses = self.store.get_by_user_id(user_id).await?;
        Ok(summarize(responses))
    }
}
