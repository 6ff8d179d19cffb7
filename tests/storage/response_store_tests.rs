//! ResponseStore interface tests.
//!
//! These tests verify the contract of the ResponseStore trait.
//! Each storage implementation should run these tests. Every test uses a
//! fresh user id, so stores can be shared between tests without cleanup.

use std::time::Duration;

use futures::future::join_all;
use uuid::Uuid;

use esg_ledger::metrics::calculate;
use esg_ledger::model::EsgInput;
use esg_ledger::storage::{ResponseStore, StorageError};

/// A user id no other test touches.
pub fn fresh_user() -> String {
    format!("test_user_{}", Uuid::new_v4())
}

/// The worked example from the questionnaire guide.
pub fn scenario_input() -> EsgInput {
    EsgInput {
        total_electricity_consumption: Some(1000.0),
        renewable_electricity_consumption: Some(250.0),
        total_fuel_consumption: Some(300.0),
        carbon_emissions: Some(1500.0),
        total_employees: Some(200.0),
        female_employees: Some(90.0),
        average_training_hours: Some(12.5),
        community_investment_spend: Some(500_000.0),
        independent_board_members_percent: Some(40.0),
        has_data_privacy_policy: Some(true),
        total_revenue: Some(10_000_000.0),
    }
}

// =============================================================================
// create_or_update tests
// =============================================================================

pub async fn test_save_round_trip<S: ResponseStore>(store: &S) {
    let user = fresh_user();
    let input = scenario_input();

    let saved = store
        .create_or_update(&user, 2023, &input)
        .await
        .expect("save should succeed");

    assert_eq!(saved.user_id, user);
    assert_eq!(saved.financial_year, 2023);
    assert_eq!(saved.input, input);
    assert_eq!(saved.derived, calculate(&input));
    assert_eq!(saved.created_at, saved.updated_at);

    let fetched = store
        .get_by_user_and_year(&user, 2023)
        .await
        .expect("get should succeed")
        .expect("response should exist");

    assert_eq!(fetched, saved);
}

pub async fn test_save_scenario_values<S: ResponseStore>(store: &S) {
    let user = fresh_user();

    let saved = store
        .create_or_update(&user, 2023, &scenario_input())
        .await
        .expect("save should succeed");

    assert_eq!(saved.derived.carbon_intensity, Some(0.00015));
    assert_eq!(saved.derived.renewable_electricity_ratio, Some(25.0));
    assert_eq!(saved.derived.diversity_ratio, Some(45.0));
    assert_eq!(saved.derived.community_spend_ratio, Some(5.0));
}

pub async fn test_save_zero_revenue<S: ResponseStore>(store: &S) {
    let user = fresh_user();
    let input = EsgInput {
        total_revenue: Some(0.0),
        ..scenario_input()
    };

    let saved = store
        .create_or_update(&user, 2023, &input)
        .await
        .expect("save should succeed");

    assert_eq!(saved.derived.carbon_intensity, None);
    assert_eq!(saved.derived.community_spend_ratio, None);
    assert_eq!(saved.derived.diversity_ratio, Some(45.0));
    assert_eq!(saved.input.total_revenue, Some(0.0));
}

pub async fn test_save_extreme_magnitudes<S: ResponseStore>(store: &S) {
    let user = fresh_user();
    let input = EsgInput {
        carbon_emissions: Some(1e300),
        total_revenue: Some(1e-300),
        ..Default::default()
    };

    let saved = store
        .create_or_update(&user, 2023, &input)
        .await
        .expect("save should succeed");

    assert_eq!(saved.input, input);
    assert_eq!(saved.derived.carbon_intensity, None);

    let fetched = store
        .get_by_user_and_year(&user, 2023)
        .await
        .expect("get should succeed")
        .expect("response should exist");
    assert_eq!(fetched, saved);
}

pub async fn test_save_empty_input<S: ResponseStore>(store: &S) {
    let user = fresh_user();

    let saved = store
        .create_or_update(&user, 2023, &EsgInput::default())
        .await
        .expect("save should succeed");

    assert_eq!(saved.input, EsgInput::default());
    assert_eq!(saved.derived, calculate(&EsgInput::default()));
}

pub async fn test_save_is_idempotent<S: ResponseStore>(store: &S) {
    let user = fresh_user();
    let input = scenario_input();

    let first = store
        .create_or_update(&user, 2023, &input)
        .await
        .expect("first save should succeed");
    tokio::time::sleep(Duration::from_millis(10)).await;
    let second = store
        .create_or_update(&user, 2023, &input)
        .await
        .expect("second save should succeed");

    assert_eq!(second.id, first.id, "upsert must keep the row id");
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at > first.updated_at);
    assert_eq!(second.input, first.input);
    assert_eq!(second.derived, first.derived);

    let all = store
        .get_by_user_id(&user)
        .await
        .expect("list should succeed");
    assert_eq!(all.len(), 1);
}

pub async fn test_save_overwrites_all_fields<S: ResponseStore>(store: &S) {
    let user = fresh_user();

    store
        .create_or_update(&user, 2023, &scenario_input())
        .await
        .expect("first save should succeed");

    let partial = EsgInput {
        carbon_emissions: Some(200.0),
        total_revenue: Some(1_000.0),
        ..Default::default()
    };
    let saved = store
        .create_or_update(&user, 2023, &partial)
        .await
        .expect("second save should succeed");

    assert_eq!(saved.input, partial);
    assert_eq!(saved.derived.carbon_intensity, Some(0.2));
    assert_eq!(saved.derived.diversity_ratio, None);
    assert_eq!(saved.derived.renewable_electricity_ratio, None);
}

pub async fn test_concurrent_saves_leave_one_row<S: ResponseStore>(store: &S) {
    let user = fresh_user();
    let emissions: Vec<f64> = (1..=8).map(|i| i as f64 * 100.0).collect();

    let inputs: Vec<EsgInput> = emissions
        .iter()
        .map(|value| EsgInput {
            carbon_emissions: Some(*value),
            ..Default::default()
        })
        .collect();

    let results = join_all(
        inputs
            .iter()
            .map(|input| store.create_or_update(&user, 2023, input)),
    )
    .await;
    for result in results {
        result.expect("concurrent save should succeed");
    }

    let all = store
        .get_by_user_id(&user)
        .await
        .expect("list should succeed");
    assert_eq!(all.len(), 1, "exactly one row per (user, year)");

    let stored = all[0]
        .input
        .carbon_emissions
        .expect("one of the writes should be stored");
    assert!(emissions.contains(&stored));
}

// =============================================================================
// read tests
// =============================================================================

pub async fn test_get_nonexistent<S: ResponseStore>(store: &S) {
    let user = fresh_user();

    let response = store
        .get_by_user_and_year(&user, 2023)
        .await
        .expect("get should succeed");
    assert!(response.is_none());

    let all = store
        .get_by_user_id(&user)
        .await
        .expect("list should succeed");
    assert!(all.is_empty());
}

pub async fn test_list_newest_first<S: ResponseStore>(store: &S) {
    let user = fresh_user();
    for year in [2022, 2024, 2023] {
        store
            .create_or_update(&user, year, &EsgInput::default())
            .await
            .expect("save should succeed");
    }

    let years: Vec<i32> = store
        .get_by_user_id(&user)
        .await
        .expect("list should succeed")
        .iter()
        .map(|r| r.financial_year)
        .collect();
    assert_eq!(years, vec![2024, 2023, 2022]);

    let years = store
        .get_financial_years(&user)
        .await
        .expect("years should succeed");
    assert_eq!(years, vec![2024, 2023, 2022]);
}

pub async fn test_users_are_isolated<S: ResponseStore>(store: &S) {
    let alice = fresh_user();
    let bob = fresh_user();

    let alices = store
        .create_or_update(&alice, 2023, &scenario_input())
        .await
        .expect("save should succeed");
    let bobs = store
        .create_or_update(&bob, 2023, &EsgInput::default())
        .await
        .expect("save should succeed");

    assert_ne!(alices.id, bobs.id);

    let fetched = store
        .get_by_user_and_year(&alice, 2023)
        .await
        .expect("get should succeed")
        .expect("response should exist");
    assert_eq!(fetched.input, scenario_input());

    assert_eq!(
        store.get_financial_years(&bob).await.expect("years should succeed"),
        vec![2023]
    );
}

// =============================================================================
// delete tests
// =============================================================================

pub async fn test_delete_existing<S: ResponseStore>(store: &S) {
    let user = fresh_user();
    store
        .create_or_update(&user, 2022, &EsgInput::default())
        .await
        .expect("save should succeed");
    store
        .create_or_update(&user, 2023, &EsgInput::default())
        .await
        .expect("save should succeed");

    store.delete(&user, 2022).await.expect("delete should succeed");

    assert!(store
        .get_by_user_and_year(&user, 2022)
        .await
        .expect("get should succeed")
        .is_none());
    assert_eq!(
        store.get_financial_years(&user).await.expect("years should succeed"),
        vec![2023]
    );
}

pub async fn test_delete_nonexistent<S: ResponseStore>(store: &S) {
    let user = fresh_user();

    let err = store
        .delete(&user, 2022)
        .await
        .expect_err("delete of a missing pair should fail");

    match err {
        StorageError::NotFound {
            user_id,
            financial_year,
        } => {
            assert_eq!(user_id, user);
            assert_eq!(financial_year, 2022);
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

pub async fn test_save_after_delete_is_new_row<S: ResponseStore>(store: &S) {
    let user = fresh_user();
    let first = store
        .create_or_update(&user, 2022, &EsgInput::default())
        .await
        .expect("save should succeed");

    store.delete(&user, 2022).await.expect("delete should succeed");

    let second = store
        .create_or_update(&user, 2022, &EsgInput::default())
        .await
        .expect("save should succeed");
    assert_ne!(second.id, first.id);
}

// =============================================================================
// Test runner macro
// =============================================================================

/// Run all ResponseStore interface tests against a store implementation.
#[macro_export]
macro_rules! run_response_store_tests {
    ($store:expr) => {
        use $crate::storage::response_store_tests::*;

        // create_or_update tests
        test_save_round_trip($store).await;
        println!("  test_save_round_trip: PASSED");

        test_save_scenario_values($store).await;
        println!("  test_save_scenario_values: PASSED");

        test_save_zero_revenue($store).await;
        println!("  test_save_zero_revenue: PASSED");

        test_save_extreme_magnitudes($store).await;
        println!("  test_save_extreme_magnitudes: PASSED");

        test_save_empty_input($store).await;
        println!("  test_save_empty_input: PASSED");

        test_save_is_idempotent($store).await;
        println!("  test_save_is_idempotent: PASSED");

        test_save_overwrites_all_fields($store).await;
        println!("  test_save_overwrites_all_fields: PASSED");

        test_concurrent_saves_leave_one_row($store).await;
        println!("  test_concurrent_saves_leave_one_row: PASSED");

        // read tests
        test_get_nonexistent($store).await;
        println!("  test_get_nonexistent: PASSED");

        test_list_newest_first($store).await;
        println!("  test_list_newest_first: PASSED");

        test_users_are_isolated($store).await;
        println!("  test_users_are_isolated: PASSED");

        // delete tests
        test_delete_existing($store).await;
        println!("  test_delete_existing: PASSED");

        test_delete_nonexistent($store).await;
        println!("  test_delete_nonexistent: PASSED");

        test_save_after_delete_is_new_row($store).await;
        println!("  test_save_after_delete_is_new_row: PASSED");
    };
}
