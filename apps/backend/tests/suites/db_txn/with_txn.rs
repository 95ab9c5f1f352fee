use league::db::require_db;
use league::db::txn::with_txn;
use league::services::sports::{SportInput, SportService};
use league::{AppError, ErrorCode};

use crate::support::build_test_state;

fn cricket() -> SportInput {
    SportInput {
        name: "Cricket".to_string(),
        slug: None,
    }
}

#[tokio::test]
async fn ok_commits() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;

    let sport = with_txn(None, &state, |txn| {
        Box::pin(async move { Ok(SportService::new().create(txn, cricket()).await?) })
    })
    .await?;

    let db = require_db(&state)?;
    let stored = SportService::new().get(db, sport.id).await?;
    assert_eq!(stored, sport);
    Ok(())
}

#[tokio::test]
async fn err_rolls_back() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;

    let result: Result<(), AppError> = with_txn(None, &state, |txn| {
        Box::pin(async move {
            SportService::new().create(txn, cricket()).await?;
            Err(AppError::internal("abort after write"))
        })
    })
    .await;
    let err = result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::Internal);

    let db = require_db(&state)?;
    assert!(SportService::new().list(db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn domain_error_rolls_back_earlier_writes() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;

    let result = with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = SportService::new();
            service.create(txn, cricket()).await?;
            // Duplicate name fails validation inside the same transaction.
            Ok(service.create(txn, cricket()).await?)
        })
    })
    .await;
    let err = result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationError);
    assert!(err.field_errors().is_some_and(|e| e.has("name")));

    let db = require_db(&state)?;
    assert!(SportService::new().list(db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn without_db_is_unavailable() -> Result<(), Box<dyn std::error::Error>> {
    let state = league::build_state().build().await?;

    let result: Result<(), AppError> =
        with_txn(None, &state, |_txn| Box::pin(async move { Ok(()) })).await;
    assert!(matches!(result, Err(AppError::DbUnavailable)));
    Ok(())
}
