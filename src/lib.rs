//! ESG questionnaire backend.
//!
//! Users file one questionnaire response per financial year. Each save is
//! cleaned, run through the metric calculator, and upserted on
//! `(user_id, financial_year)`.

pub mod config;
pub mod handlers;
pub mod metrics;
pub mod model;
pub mod services;
pub mod storage;
pub mod utils;
pub mod validation;
