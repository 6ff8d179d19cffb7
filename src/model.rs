//! Questionnaire record types.
//!
//! Field names serialize in camelCase; the dashboard reads them directly, so
//! renaming a field is a wire-breaking change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::DerivedMetrics;

/// Raw questionnaire answers as supplied by the user.
///
/// Every field is optional. Units follow the metadata catalog
/// (see [`crate::metrics::metadata`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EsgInput {
    // Environmental
    /// kWh
    pub total_electricity_consumption: Option<f64>,
    /// kWh
    pub renewable_electricity_consumption: Option<f64>,
    /// liters
    pub total_fuel_consumption: Option<f64>,
    /// T CO2e
    pub carbon_emissions: Option<f64>,

    // Social
    pub total_employees: Option<f64>,
    pub female_employees: Option<f64>,
    /// Average training hours per employee per year.
    pub average_training_hours: Option<f64>,
    /// INR
    pub community_investment_spend: Option<f64>,

    // Governance
    /// Percentage of independent board members.
    pub independent_board_members_percent: Option<f64>,
    pub has_data_privacy_policy: Option<bool>,
    /// INR
    pub total_revenue: Option<f64>,
}

/// A stored response for one `(user_id, financial_year)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EsgResponse {
    pub id: String,
    pub user_id: String,
    pub financial_year: i32,
    #[serde(flatten)]
    pub input: EsgInput,
    #[serde(flatten)]
    pub derived: DerivedMetrics,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
