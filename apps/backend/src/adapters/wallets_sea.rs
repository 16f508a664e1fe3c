//! SeaORM adapter for wallet balances.
//!
//! Debits are conditional single-statement updates so the balance check and
//! the subtraction are one atomic operation; the enclosing transaction's row
//! lock serializes concurrent movement on the same account.

use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use time::OffsetDateTime;

use crate::entities::wallets;

/// Result of a conditional debit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebitOutcome {
    Applied,
    InsufficientBalance,
    WalletNotFound,
}

pub async fn find_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<wallets::Model>, sea_orm::DbErr> {
    wallets::Entity::find_by_id(user_id).one(conn).await
}

/// `UPDATE wallets SET balance = balance - $amount
///  WHERE user_id = $user AND balance >= $amount`
pub async fn debit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    amount: i64,
) -> Result<DebitOutcome, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let result = wallets::Entity::update_many()
        .col_expr(
            wallets::Column::Balance,
            Expr::col(wallets::Column::Balance).sub(amount),
        )
        .col_expr(wallets::Column::UpdatedAt, Expr::val(now).into())
        .filter(wallets::Column::UserId.eq(user_id))
        .filter(wallets::Column::Balance.gte(amount))
        .exec(conn)
        .await?;

    if result.rows_affected > 0 {
        return Ok(DebitOutcome::Applied);
    }
    match find_by_user(conn, user_id).await? {
        Some(_) => Ok(DebitOutcome::InsufficientBalance),
        None => Ok(DebitOutcome::WalletNotFound),
    }
}

/// Credit an account, creating the wallet row when absent so a payout can
/// never fail on a missing row.
pub async fn credit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    amount: i64,
) -> Result<(), sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let result = wallets::Entity::update_many()
        .col_expr(
            wallets::Column::Balance,
            Expr::col(wallets::Column::Balance).add(amount),
        )
        .col_expr(wallets::Column::UpdatedAt, Expr::val(now).into())
        .filter(wallets::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        let active = wallets::ActiveModel {
            user_id: Set(user_id),
            balance: Set(amount),
            created_at: Set(now),
            updated_at: Set(now),
        };
        active.insert(conn).await?;
    }
    Ok(())
}
