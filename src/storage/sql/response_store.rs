//! Unified SQL ResponseStore implementation.
//!
//! Uses a macro to generate implementations for each SQL backend,
//! eliminating code duplication while maintaining type safety.

use std::marker::PhantomData;

use sea_query::{Expr, Order, Query, SelectStatement};

use super::SqlDatabase;
use crate::storage::schema::EsgResponses;

/// SQL-based implementation of ResponseStore.
///
/// This generic implementation works with any SQL database that implements
/// the `SqlDatabase` trait (PostgreSQL, SQLite).
pub struct SqlResponseStore<DB: SqlDatabase> {
    pool: DB::Pool,
    _marker: PhantomData<DB>,
}

impl<DB: SqlDatabase> SqlResponseStore<DB> {
    /// Create a new SQL response store with the given pool.
    pub fn new(pool: DB::Pool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &DB::Pool {
        &self.pool
    }
}

/// All columns, in the order rows are decoded.
const ALL_COLUMNS: [EsgResponses; 20] = [
    EsgResponses::Id,
    EsgResponses::UserId,
    EsgResponses::FinancialYear,
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
    EsgResponses::CreatedAt,
    EsgResponses::UpdatedAt,
];

/// Select every column of a user's rows.
fn select_for_user(user_id: &str) -> SelectStatement {
    Query::select()
        .columns(ALL_COLUMNS)
        .from(EsgResponses::Table)
        .and_where(Expr::col(EsgResponses::UserId).eq(user_id))
        .to_owned()
}

/// Select every column of a user's rows, newest financial year first.
fn select_all_for_user(user_id: &str) -> SelectStatement {
    select_for_user(user_id)
        .order_by(EsgResponses::FinancialYear, Order::Desc)
        .to_owned()
}

/// Select the row for one natural key.
fn select_one(user_id: &str, financial_year: i32) -> SelectStatement {
    select_for_user(user_id)
        .and_where(Expr::col(EsgResponses::FinancialYear).eq(financial_year))
        .to_owned()
}

/// Macro to implement ResponseStore for a specific SQL backend.
///
/// `$row_type` is the backend's row type, used to decode records.
macro_rules! impl_response_store {
    ($db_type:ty, $row_type:ty, $feature:literal) => {
        #[cfg(feature = $feature)]
        impl SqlResponseStore<$db_type> {
            fn decode(row: &$row_type) -> crate::storage::Result<crate::model::EsgResponse> {
                use sqlx::Row;

                use crate::metrics::DerivedMetrics;
                use crate::model::{EsgInput, EsgResponse};
                use crate::storage::parse_timestamp;

                let created_at: String = row.try_get("created_at")?;
                let updated_at: String = row.try_get("updated_at")?;

                Ok(EsgResponse {
                    id: row.try_get("id")?,
                    user_id: row.try_get("user_id")?,
                    financial_year: row.try_get("financial_year")?,
                    input: EsgInput {
                        total_electricity_consumption: row
                            .try_get("total_electricity_consumption")?,
                        renewable_electricity_consumption: row
                            .try_get("renewable_electricity_consumption")?,
                        total_fuel_consumption: row.try_get("total_fuel_consumption")?,
                        carbon_emissions: row.try_get("carbon_emissions")?,
                        total_employees: row.try_get("total_employees")?,
                        female_employees: row.try_get("female_employees")?,
                        average_training_hours: row.try_get("average_training_hours")?,
                        community_investment_spend: row.try_get("community_investment_spend")?,
                        independent_board_members_percent: row
                            .try_get("independent_board_members_percent")?,
                        has_data_privacy_policy: row.try_get("has_data_privacy_policy")?,
                        total_revenue: row.try_get("total_revenue")?,
                    },
                    derived: DerivedMetrics {
                        carbon_intensity: row.try_get("carbon_intensity")?,
                        renewable_electricity_ratio: row.try_get("renewable_electricity_ratio")?,
                        diversity_ratio: row.try_get("diversity_ratio")?,
                        community_spend_ratio: row.try_get("community_spend_ratio")?,
                    },
                    created_at: parse_timestamp("created_at", &created_at)?,
                    updated_at: parse_timestamp("updated_at", &updated_at)?,
                })
            }
        }

        #[cfg(feature = $feature)]
        #[async_trait::async_trait]
        impl crate::storage::ResponseStore for SqlResponseStore<$db_type> {
            async fn init_schema(&self) -> crate::storage::Result<()> {
                sqlx::query(<$db_type as SqlDatabase>::CREATE_RESPONSES_TABLE)
                    .execute(&self.pool)
                    .await?;
                Ok(())
            }

            async fn create_or_update(
                &self,
                user_id: &str,
                financial_year: i32,
                input: &crate::model::EsgInput,
            ) -> crate::storage::Result<crate::model::EsgResponse> {
                use sea_query::OnConflict;

                use crate::storage::{format_timestamp, now};

                let derived = crate::metrics::calculate(input);
                let timestamp = format_timestamp(&now());
                let id = uuid::Uuid::new_v4().to_string();

                let stmt = Query::insert()
                    .into_table(EsgResponses::Table)
                    .columns(ALL_COLUMNS)
                    .values_panic([
                        id.into(),
                        user_id.into(),
                        financial_year.into(),
                        input.total_electricity_consumption.into(),
                        input.renewable_electricity_consumption.into(),
                        input.total_fuel_consumption.into(),
                        input.carbon_emissions.into(),
                        input.total_employees.into(),
                        input.female_employees.into(),
                        input.average_training_hours.into(),
                        input.community_investment_spend.into(),
                        input.independent_board_members_percent.into(),
                        input.has_data_privacy_policy.into(),
                        input.total_revenue.into(),
                        derived.carbon_intensity.into(),
                        derived.renewable_electricity_ratio.into(),
                        derived.diversity_ratio.into(),
                        derived.community_spend_ratio.into(),
                        timestamp.clone().into(),
                        timestamp.into(),
                    ])
                    .on_conflict(
                        OnConflict::columns([EsgResponses::UserId, EsgResponses::FinancialYear])
                            .update_columns(EsgResponses::OVERWRITTEN)
                            .to_owned(),
                    )
                    .returning_all()
                    .to_owned();

                let sql = <$db_type>::build_insert(stmt);
                let row = sqlx::query(&sql).fetch_one(&self.pool).await?;

                Self::decode(&row)
            }

            async fn get_by_user_id(
                &self,
                user_id: &str,
            ) -> crate::storage::Result<Vec<crate::model::EsgResponse>> {
                let sql = <$db_type>::build_select(select_all_for_user(user_id));
                let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

                rows.iter().map(Self::decode).collect()
            }

            async fn get_by_user_and_year(
                &self,
                user_id: &str,
                financial_year: i32,
            ) -> crate::storage::Result<Option<crate::model::EsgResponse>> {
                let sql = <$db_type>::build_select(select_one(user_id, financial_year));
                let row = sqlx::query(&sql).fetch_optional(&self.pool).await?;

                row.as_ref().map(Self::decode).transpose()
            }

            async fn delete(&self, user_id: &str, financial_year: i32) -> crate::storage::Result<()> {
                let stmt = Query::delete()
                    .from_table(EsgResponses::Table)
                    .and_where(Expr::col(EsgResponses::UserId).eq(user_id))
                    .and_where(Expr::col(EsgResponses::FinancialYear).eq(financial_year))
                    .to_owned();

                let sql = <$db_type>::build_delete(stmt);
                let result = sqlx::query(&sql).execute(&self.pool).await?;

                if result.rows_affected() == 0 {
                    return Err(crate::storage::StorageError::NotFound {
                        user_id: user_id.to_string(),
                        financial_year,
                    });
                }

                Ok(())
            }

            async fn get_financial_years(&self, user_id: &str) -> crate::storage::Result<Vec<i32>> {
                use sqlx::Row;

                let stmt = Query::select()
                    .column(EsgResponses::FinancialYear)
                    .from(EsgResponses::Table)
                    .and_where(Expr::col(EsgResponses::UserId).eq(user_id))
                    .order_by(EsgResponses::FinancialYear, Order::Desc)
                    .to_owned();

                let sql = <$db_type>::build_select(stmt);
                let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

                rows.iter()
                    .map(|r| r.try_get::<i32, _>("financial_year").map_err(Into::into))
                    .collect()
            }

            async fn close(&self) {
                self.pool.close().await;
            }
        }
    };
}

// Generate implementations for each SQL backend
impl_response_store!(super::postgres::Postgres, sqlx::postgres::PgRow, "postgres");
impl_response_store!(super::sqlite::Sqlite, sqlx::sqlite::SqliteRow, "sqlite");
