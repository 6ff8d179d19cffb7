//! Database schema definitions using sea-query.
//!
//! These define the table and column identifiers for type-safe query building.

use sea_query::Iden;

/// ESG responses table schema.
///
/// One row per `(user_id, financial_year)`; the pair carries a unique
/// constraint that the upsert targets.
#[derive(Iden, Clone, Copy)]
pub enum EsgResponses {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "user_id"]
    UserId,
    #[iden = "financial_year"]
    FinancialYear,
    #[iden = "total_electricity_consumption"]
    TotalElectricityConsumption,
    #[iden = "renewable_electricity_consumption"]
    RenewableElectricityConsumption,
    #[iden = "total_fuel_consumption"]
    TotalFuelConsumption,
    #[iden = "carbon_emissions"]
    CarbonEmissions,
    #[iden = "total_employees"]
    TotalEmployees,
    #[iden = "female_employees"]
    FemaleEmployees,
    #[iden = "average_training_hours"]
    AverageTrainingHours,
    #[iden = "community_investment_spend"]
    CommunityInvestmentSpend,
    #[iden = "independent_board_members_percent"]
    IndependentBoardMembersPercent,
    #[iden = "has_data_privacy_policy"]
    HasDataPrivacyPolicy,
    #[iden = "total_revenue"]
    TotalRevenue,
    #[iden = "carbon_intensity"]
    CarbonIntensity,
    #[iden = "renewable_electricity_ratio"]
    RenewableElectricityRatio,
    #[iden = "diversity_ratio"]
    DiversityRatio,
    #[iden = "community_spend_ratio"]
    CommunitySpendRatio,
    #[iden = "created_at"]
    CreatedAt,
    #[iden = "updated_at"]
    UpdatedAt,
}

impl EsgResponses {
    /// Columns rewritten on every save: raw answers, derived metrics and
    /// `updated_at`. Identity and creation columns are never in this list.
    pub const OVERWRITTEN: [EsgResponses; 16] = [
        EsgResponses::TotalElectricityConsumption,
        EsgResponses::RenewableElectricityConsumption,
        EsgResponses::TotalFuelConsumption,
        EsgResponses::CarbonEmissions,
        EsgResponses::TotalEmployees,
        EsgResponses::FemaleEmployees,
        EsgResponses::AverageTrainingHours,
        EsgResponses::CommunityInvestmentSpend,
        EsgResponses::IndependentBoardMembersPercent,
        EsgResponses::HasDataPrivacyPolicy,
        EsgResponses::TotalRevenue,
        EsgResponses::CarbonIntensity,
        EsgResponses::RenewableElectricityRatio,
        EsgResponses::DiversityRatio,
        EsgResponses::CommunitySpendRatio,
        EsgResponses::UpdatedAt,
    ];
}

/// SQL for creating the responses table on SQLite.
pub const CREATE_ESG_RESPONSES_TABLE_SQLITE: &str = r#"
CREATE TABLE IF NOT EXISTS esg_responses (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    financial_year INTEGER NOT NULL,
    total_electricity_consumption REAL,
    renewable_electricity_consumption REAL,
    total_fuel_consumption REAL,
    carbon_emissions REAL,
    total_employees REAL,
    female_employees REAL,
    average_training_hours REAL,
    community_investment_spend REAL,
    independent_board_members_percent REAL,
    has_data_privacy_policy BOOLEAN,
    total_revenue REAL,
    carbon_intensity REAL,
    renewable_electricity_ratio REAL,
    diversity_ratio REAL,
    community_spend_ratio REAL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (user_id, financial_year)
);
"#;

/// SQL for creating the responses table on PostgreSQL.
pub const CREATE_ESG_RESPONSES_TABLE_POSTGRES: &str = r#"
CREATE TABLE IF NOT EXISTS esg_responses (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    financial_year INTEGER NOT NULL,
    total_electricity_consumption DOUBLE PRECISION,
    renewable_electricity_consumption DOUBLE PRECISION,
    total_fuel_consumption DOUBLE PRECISION,
    carbon_emissions DOUBLE PRECISION,
    total_employees DOUBLE PRECISION,
    female_employees DOUBLE PRECISION,
    average_training_hours DOUBLE PRECISION,
    community_investment_spend DOUBLE PRECISION,
    independent_board_members_percent DOUBLE PRECISION,
    has_data_privacy_policy BOOLEAN,
    total_revenue DOUBLE PRECISION,
    carbon_intensity DOUBLE PRECISION,
    renewable_electricity_ratio DOUBLE PRECISION,
    diversity_ratio DOUBLE PRECISION,
    community_spend_ratio DOUBLE PRECISION,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (user_id, financial_year)
);
"#;
