//! Questionnaire metadata catalog.
//!
//! Describes every field the dashboard renders: grouping, display title,
//! input type and unit. Served unauthenticated so the form can be built
//! before login.

use serde::Serialize;

/// Input widget type for a questionnaire field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Number,
    Dropdown,
}

/// One user-supplied questionnaire field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDef {
    pub key: &'static str,
    pub title: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'static [&'static str]>,
    pub unit: &'static str,
}

impl FieldDef {
    const fn number(key: &'static str, title: &'static str, unit: &'static str) -> Self {
        Self {
            key,
            title,
            field_type: FieldType::Number,
            options: None,
            unit,
        }
    }

    const fn yes_no(key: &'static str, title: &'static str) -> Self {
        Self {
            key,
            title,
            field_type: FieldType::Dropdown,
            options: Some(&["Yes", "No"]),
            unit: "",
        }
    }
}

/// One auto-calculated metric.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedDef {
    pub key: &'static str,
    pub title: &'static str,
    pub formula: &'static str,
    pub unit: &'static str,
}

/// The full catalog, grouped the way the questionnaire is laid out.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsMetadata {
    pub environmental: Vec<FieldDef>,
    pub social: Vec<FieldDef>,
    pub governance: Vec<FieldDef>,
    pub auto_calculated: Vec<DerivedDef>,
}

impl MetricsMetadata {
    /// Keys of every user-supplied field, in catalog order.
    pub fn input_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.environmental
            .iter()
            .chain(&self.social)
            .chain(&self.governance)
            .map(|f| f.key)
    }
}

/// Build the metadata catalog.
pub fn catalog() -> MetricsMetadata {
    MetricsMetadata {
        environmental: vec![
            FieldDef::number(
                "totalElectricityConsumption",
                "Total electricity consumption",
                "kWh",
            ),
            FieldDef::number(
                "renewableElectricityConsumption",
                "Renewable electricity consumption",
                "kWh",
            ),
            FieldDef::number("totalFuelConsumption", "Total fuel consumption", "liters"),
            FieldDef::number("carbonEmissions", "Carbon emissions", "T CO2e"),
        ],
        social: vec![
            FieldDef::number("totalEmployees", "Total number of employees", ""),
            FieldDef::number("femaleEmployees", "Number of female employees", ""),
            FieldDef::number(
                "averageTrainingHours",
                "Average training hours per employee (per year)",
                "",
            ),
            FieldDef::number("communityInvestmentSpend", "Community investment spend", "INR"),
        ],
        governance: vec![
            FieldDef::number(
                "independentBoardMembersPercent",
                "% of independent board members",
                "%",
            ),
            FieldDef::yes_no(
                "hasDataPrivacyPolicy",
                "Does the company have a data privacy policy?",
            ),
            FieldDef::number("totalRevenue", "Total Revenue", "INR"),
        ],
        auto_calculated: vec![
            DerivedDef {
                key: "carbonIntensity",
                title: "Carbon Intensity",
                formula: "(Carbon emissions / Total revenue)",
                unit: "T CO2e / INR",
            },
            DerivedDef {
                key: "renewableElectricityRatio",
                title: "Renewable Electricity Ratio",
                formula: "100 * (Renewable electricity consumption / Total electricity consumption)",
                unit: "%",
            },
            DerivedDef {
                key: "diversityRatio",
                title: "Diversity Ratio",
                formula: "100 * (Female Employees / Total Employees)",
                unit: "%",
            },
            DerivedDef {
                key: "communitySpendRatio",
                title: "Community Spend Ratio",
                formula: "100 * (Community investment spend / Total Revenue)",
                unit: "%",
            },
        ],
    }
}
