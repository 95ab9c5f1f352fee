use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::debug;

use super::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// A transaction injected into request extensions by tests; `with_txn` runs on it
/// and leaves commit/rollback to whoever created it.
#[derive(Clone)]
pub struct SharedTxn(pub Arc<DatabaseTransaction>);

impl SharedTxn {
    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.0
    }
}

/// Run `f` inside a database transaction.
///
/// 1) A `SharedTxn` in request extensions is used as-is.
/// 2) Otherwise a transaction is begun, committed when `f` returns `Ok`
///    and rolled back when it returns `Err`.
///
/// Handlers pass `|txn| Box::pin(async move { ... })`.
pub async fn with_txn<R, F>(
    req: Option<&HttpRequest>,
    state: &AppState,
    f: F,
) -> Result<R, AppError>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> LocalBoxFuture<'a, Result<R, AppError>>,
{
    // clone out before awaiting so no RefCell borrow is held across the await
    let shared_txn: Option<SharedTxn> = req.and_then(|r| r.extensions().get::<SharedTxn>().cloned());

    if let Some(shared) = shared_txn {
        return f(shared.transaction()).await;
    }

    let db = require_db(state)?;
    let txn = db.begin().await?;

    match f(&txn).await {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                debug!(error = %rollback_err, "rollback after handler error failed");
            }
            Err(err)
        }
    }
}
