//! Derived sustainability metrics.
//!
//! Four ratios are computed from the raw answers. Each one is produced only
//! when all of its inputs are present and its denominator is strictly
//! positive; otherwise the output field stays `None`. There are no error
//! cases: a missing or zero denominator means "not computable", not failure.

pub mod metadata;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::model::EsgInput;

/// Auto-calculated fields stored alongside the raw answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    /// T CO2e / INR
    pub carbon_intensity: Option<f64>,
    /// %
    pub renewable_electricity_ratio: Option<f64>,
    /// %
    pub diversity_ratio: Option<f64>,
    /// %
    pub community_spend_ratio: Option<f64>,
}

/// Compute every derived metric for `input`.
///
/// Gating is on presence, so a present numerator of `0.0` yields a ratio of
/// `0.0` rather than suppressing the output.
pub fn calculate(input: &EsgInput) -> DerivedMetrics {
    DerivedMetrics {
        carbon_intensity: ratio(input.carbon_emissions, input.total_revenue, 1.0),
        renewable_electricity_ratio: ratio(
            input.renewable_electricity_consumption,
            input.total_electricity_consumption,
            100.0,
        ),
        diversity_ratio: ratio(input.female_employees, input.total_employees, 100.0),
        community_spend_ratio: ratio(
            input.community_investment_spend,
            input.total_revenue,
            100.0,
        ),
    }
}

/// `scale * numerator / denominator` when both are present and the
/// denominator is positive. A result that overflows to infinity is absent.
fn ratio(numerator: Option<f64>, denominator: Option<f64>, scale: f64) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d > 0.0 => Some(scale * n / d).filter(|v| v.is_finite()),
        _ => None,
    }
}
