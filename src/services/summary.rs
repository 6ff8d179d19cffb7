//! Dashboard summary built from a user's responses.

use serde::Serialize;

use crate::model::EsgResponse;

/// One point of a per-year trend line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub value: f64,
}

/// Trend lines charted on the dashboard. Years without a value are skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trends {
    pub carbon_emissions: Vec<TrendPoint>,
    pub total_revenue: Vec<TrendPoint>,
    pub total_employees: Vec<TrendPoint>,
    pub diversity_ratio: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_responses: usize,
    pub financial_years: Vec<i32>,
    /// Response with the highest financial year.
    pub latest_response: Option<EsgResponse>,
    pub trends: Trends,
}

/// Summarize responses. Order of the input does not matter; everything in
/// the output is newest year first.
pub fn summarize(mut responses: Vec<EsgResponse>) -> Summary {
    responses.sort_by(|a, b| b.financial_year.cmp(&a.financial_year));

    let trend = |value: fn(&EsgResponse) -> Option<f64>| -> Vec<TrendPoint> {
        responses
            .iter()
            .filter_map(|r| {
                value(r).map(|v| TrendPoint {
                    year: r.financial_year,
                    value: v,
                })
            })
            .collect()
    };

    let trends = Trends {
        carbon_emissions: trend(|r| r.input.carbon_emissions),
        total_revenue: trend(|r| r.input.total_revenue),
        total_employees: trend(|r| r.input.total_employees),
        diversity_ratio: trend(|r| r.derived.diversity_ratio),
    };

    Summary {
        total_responses: responses.len(),
        financial_years: responses.iter().map(|r| r.financial_year).collect(),
        latest_response: responses.first().cloned(),
        trends,
    }
}
