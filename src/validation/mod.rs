//! Input validation for questionnaire submissions.
//!
//! Everything that crosses the HTTP boundary passes through here before it
//! reaches the calculator or the store: the financial year is range-checked
//! and the raw form fields are cleaned into an [`EsgInput`].


use chrono::Datelike;
use serde_json::{Map, Value};

use crate::model::EsgInput;

/// Range limits for validated fields.
pub mod limits {
    /// Earliest accepted financial year.
    pub const MIN_FINANCIAL_YEAR: i32 = 2000;
    /// How many years past the current calendar year may be filed.
    pub const MAX_YEARS_AHEAD: i32 = 1;
}

/// Key carrying the natural-key year in a submission body.
pub const FINANCIAL_YEAR_KEY: &str = "financialYear";

/// Key of the only boolean questionnaire field.
pub const PRIVACY_POLICY_KEY: &str = "hasDataPrivacyPolicy";

/// Validation failures. All of them map to HTTP 400.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Financial year is required and must be a number")]
    MissingFinancialYear,

    #[error("Financial year must be a whole number")]
    FinancialYearNotInteger,

    #[error("Financial year must be between {min} and {max}")]
    FinancialYearOutOfRange { year: i64, min: i32, max: i32 },

    #[error("Invalid financial year parameter")]
    InvalidYearParameter,

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field {0} must be a finite number")]
    InvalidNumber(String),

    #[error("Field {0} must be a boolean or Yes/No")]
    InvalidBoolean(String),
}

/// A cleaned submission, ready for the calculator and the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub financial_year: i32,
    pub input: EsgInput,
}

/// The current calendar year (UTC).
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Validate a financial year against `[MIN_FINANCIAL_YEAR, current_year + MAX_YEARS_AHEAD]`.
pub fn validate_financial_year(year: i64, current_year: i32) -> Result<i32, ValidationError> {
    let min = limits::MIN_FINANCIAL_YEAR;
    let max = current_year + limits::MAX_YEARS_AHEAD;

    if year < i64::from(min) || year > i64::from(max) {
        return Err(ValidationError::FinancialYearOutOfRange { year, min, max });
    }

    // In range, so it fits.
    Ok(year as i32)
}

/// Parse the `{year}` path segment. No range check: reads and deletes of
/// out-of-range years simply find nothing.
pub fn parse_year_param(raw: &str) -> Result<i32, ValidationError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ValidationError::InvalidYearParameter)
}

/// Clean a raw JSON submission body.
///
/// Rules:
/// - `financialYear` is required, must be a JSON number with no fractional
///   part (`2024` or `2024.0`), and must be in range
/// - `null` and `""` values are dropped (the field stays absent)
/// - numeric fields accept numbers or numeric strings; non-finite values are rejected
/// - `hasDataPrivacyPolicy` accepts booleans or strings (`"Yes"` is true, anything else false)
/// - any other key, including derived metrics, is rejected
pub fn clean_submission(body: &Value, current_year: i32) -> Result<Submission, ValidationError> {
    let fields = body.as_object().ok_or(ValidationError::NotAnObject)?;

    let year = fields
        .get(FINANCIAL_YEAR_KEY)
        .ok_or(ValidationError::MissingFinancialYear)
        .and_then(whole_year)?;
    let financial_year = validate_financial_year(year, current_year)?;

    let input = clean_fields(fields)?;

    Ok(Submission {
        financial_year,
        input,
    })
}

/// Accept integer JSON numbers and floats with no fractional part.
fn whole_year(value: &Value) -> Result<i64, ValidationError> {
    if let Some(year) = value.as_i64() {
        return Ok(year);
    }
    match value.as_f64() {
        Some(year) if year.fract() == 0.0 => Ok(year as i64),
        Some(_) => Err(ValidationError::FinancialYearNotInteger),
        None => Err(ValidationError::MissingFinancialYear),
    }
}

fn clean_fields(fields: &Map<String, Value>) -> Result<EsgInput, ValidationError> {
    let mut input = EsgInput::default();

    for (key, value) in fields {
        if key == FINANCIAL_YEAR_KEY || is_blank(value) {
            continue;
        }

        if key == PRIVACY_POLICY_KEY {
            input.has_data_privacy_policy = Some(parse_yes_no(key, value)?);
            continue;
        }

        let slot = number_slot(&mut input, key)
            .ok_or_else(|| ValidationError::UnknownField(key.clone()))?;
        *slot = Some(parse_number(key, value)?);
    }

    Ok(input)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Map a wire key to the numeric field it fills.
fn number_slot<'a>(input: &'a mut EsgInput, key: &str) -> Option<&'a mut Option<f64>> {
    let slot = match key {
        "totalElectricityConsumption" => &mut input.total_electricity_consumption,
        "renewableElectricityConsumption" => &mut input.renewable_electricity_consumption,
        "totalFuelConsumption" => &mut input.total_fuel_consumption,
        "carbonEmissions" => &mut input.carbon_emissions,
        "totalEmployees" => &mut input.total_employees,
        "femaleEmployees" => &mut input.female_employees,
        "averageTrainingHours" => &mut input.average_training_hours,
        "communityInvestmentSpend" => &mut input.community_investment_spend,
        "independentBoardMembersPercent" => &mut input.independent_board_members_percent,
        "totalRevenue" => &mut input.total_revenue,
        _ => return None,
    };
    Some(slot)
}

fn parse_number(key: &str, value: &Value) -> Result<f64, ValidationError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::InvalidNumber(key.to_string()))
}

fn parse_yes_no(key: &str, value: &Value) -> Result<bool, ValidationError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => Ok(s == "Yes"),
        _ => Err(ValidationError::InvalidBoolean(key.to_string())),
    }
}
