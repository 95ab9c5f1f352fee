use std::sync::Arc;

use actix_web::{test, HttpMessage};
use league::db::require_db;
use league::db::txn::{with_txn, SharedTxn};
use league::services::sports::{SportInput, SportService};
use sea_orm::TransactionTrait;

use crate::support::build_test_state;

#[actix_web::test]
async fn injected_txn_is_used_and_left_open() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let txn = Arc::new(db.begin().await?);

    let req = test::TestRequest::default().to_http_request();
    req.extensions_mut().insert(SharedTxn(txn.clone()));

    let sport = with_txn(Some(&req), &state, |txn| {
        Box::pin(async move {
            Ok(SportService::new()
                .create(
                    txn,
                    SportInput {
                        name: "Rugby".to_string(),
                        slug: None,
                    },
                )
                .await?)
        })
    })
    .await?;

    // Visible inside the shared transaction, which with_txn did not commit.
    let inside = SportService::new().list(txn.as_ref()).await?;
    assert_eq!(inside, vec![sport]);

    req.extensions_mut().remove::<SharedTxn>();
    drop(req);
    let txn = Arc::try_unwrap(txn).map_err(|_| "shared transaction still referenced")?;
    txn.rollback().await?;

    assert!(SportService::new().list(db).await?.is_empty());
    Ok(())
}

#[actix_web::test]
async fn error_inside_shared_txn_leaves_it_usable() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let txn = Arc::new(db.begin().await?);

    let req = test::TestRequest::default().to_http_request();
    req.extensions_mut().insert(SharedTxn(txn.clone()));

    let result = with_txn(Some(&req), &state, |txn| {
        Box::pin(async move {
            Ok(SportService::new()
                .create(txn, SportInput::default())
                .await?)
        })
    })
    .await;
    assert!(result.is_err());

    // Still open: a follow-up write on the same transaction succeeds.
    let sport = SportService::new()
        .create(
            txn.as_ref(),
            SportInput {
                name: "Hockey".to_string(),
                slug: None,
            },
        )
        .await?;
    assert_eq!(sport.slug, "hockey");

    req.extensions_mut().remove::<SharedTxn>();
    drop(req);
    let txn = Arc::try_unwrap(txn).map_err(|_| "shared transaction still referenced")?;
    txn.rollback().await?;
    Ok(())
}
