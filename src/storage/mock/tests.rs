use super::*;

#[tokio::test]
async fn test_mock_upsert_keeps_one_row_per_key() {
    let store = MockResponseStore::new();
    let input = EsgInput {
        carbon_emissions: Some(10.0),
        ..Default::default()
    };

    store.create_or_update("user-1", 2023, &input).await.unwrap();
    store.create_or_update("user-1", 2023, &input).await.unwrap();
    store.create_or_update("user-1", 2024, &input).await.unwrap();
    store.create_or_update("user-2", 2023, &input).await.unwrap();

    assert_eq!(store.len().await, 3);
}

#[tokio::test]
async fn test_mock_fail_on_write() {
    let store = MockResponseStore::new();
    store.set_fail_on_write(true).await;

    let result = store
        .create_or_update("user-1", 2023, &EsgInput::default())
        .await;
    assert!(matches!(result, Err(StorageError::Database(_))));
    assert!(store.is_empty().await);

    let result = store.delete("user-1", 2023).await;
    assert!(matches!(result, Err(StorageError::Database(_))));
}

#[tokio::test]
async fn test_mock_fail_on_read() {
    let store = MockResponseStore::new();
    store
        .create_or_update("user-1", 2023, &EsgInput::default())
        .await
        .unwrap();
    store.set_fail_on_read(true).await;

    assert!(store.get_by_user_id("user-1").await.is_err());
    assert!(store.get_by_user_and_year("user-1", 2023).await.is_err());
    assert!(store.get_financial_years("user-1").await.is_err());

    store.set_fail_on_read(false).await;
    assert_eq!(store.get_financial_years("user-1").await.unwrap(), vec![2023]);
}
