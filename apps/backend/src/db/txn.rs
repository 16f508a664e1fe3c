use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::error::AppError;

/// Boxed future returned by `with_txn` closures. The box lets the future
/// borrow the transaction it runs on.
pub type TxnFuture<'c, R> = Pin<Box<dyn Future<Output = Result<R, AppError>> + Send + 'c>>;

/// Execute a closure within a database transaction.
///
/// Commits on `Ok`, rolls back on `Err`. Rollback is best-effort; the
/// original error is preserved. Call sites wrap their body in
/// `Box::pin(async move { ... })` and capture by value; anything the future
/// holds must outlive the transaction borrow.
pub async fn with_txn<R, F>(db: &DatabaseConnection, f: F) -> Result<R, AppError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> TxnFuture<'c, R>,
{
    let txn = db.begin().await?;
    match f(&txn).await {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}
