//! Wallet repository functions for the domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::wallets_sea::{self as wallets_adapter, DebitOutcome};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// Debit `amount` centavos from a wallet, failing on insufficient funds.
pub async fn debit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    amount: i64,
) -> Result<(), DomainError> {
    match wallets_adapter::debit(conn, user_id, amount).await? {
        DebitOutcome::Applied => Ok(()),
        DebitOutcome::InsufficientBalance => Err(DomainError::validation(
            ValidationKind::InsufficientBalance,
            format!("Wallet {user_id} has insufficient balance for {amount} centavos"),
        )),
        DebitOutcome::WalletNotFound => Err(DomainError::not_found(
            NotFoundKind::Wallet,
            format!("Wallet {user_id} not found"),
        )),
    }
}

/// Credit `amount` centavos to a wallet. Credits never fail on a missing
/// wallet row; the adapter creates one so payouts always land.
pub async fn credit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    amount: i64,
) -> Result<(), DomainError> {
    wallets_adapter::credit(conn, user_id, amount).await?;
    Ok(())
}
