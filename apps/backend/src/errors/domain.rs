//! Domain-level error type used across services and adapters.
//!
//! This error type is HTTP- and DB-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Rule violations a client can trigger with a well-formed but invalid
/// request. Each kind maps 1:1 to a machine-readable rejection code.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Stake must be a positive amount of centavos.
    InvalidStake,
    /// The player's spendable balance does not cover the stake.
    InsufficientBalance,
    /// It is not the acting seat's turn.
    NotYourTurn,
    /// The played card is not in the acting seat's hand.
    CardNotInHand,
    /// The lead suit is held and must be followed.
    MustFollowSuit,
    /// The table is not in PLAYING status.
    GameNotActive,
    /// The table is not in WAITING status.
    NotWaiting,
    /// Only the host may perform this action.
    NotHost,
    /// The acting user holds no seat at this table.
    NotAtTable,
    /// Unparseable card token.
    ParseCard(String),
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Table,
    Seat,
    Wallet,
    Other(String),
}

/// Semantic conflicts
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    TableFull,
    AlreadyAtTable,
    OptimisticLock,
    Other(String),
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
    pub fn parse_card(token: impl Into<String>) -> Self {
        let token = token.into();
        Self::Validation(
            ValidationKind::ParseCard(token.clone()),
            format!("unparseable card token: {token:?}"),
        )
    }
}

/// Whether a database error message reports a unique-constraint violation
/// (Postgres SQLSTATE 23505 or the SQLite wording).
fn is_unique_violation(msg: &str) -> bool {
    msg.contains("23505")
        || msg.contains("duplicate key value violates unique constraint")
        || msg.contains("UNIQUE constraint failed")
}

/// Conflict mapping for the unique indexes on seats. A lost join race trips
/// one of these and must surface as a retryable conflict, not a 500.
fn map_unique_violation(msg: &str) -> DomainError {
    if msg.contains("idx_seats_table_position_unique") || msg.contains("seats.table_id, seats.position")
    {
        return DomainError::conflict(
            ConflictKind::TableFull,
            "Seat position was taken concurrently. Refresh and retry.",
        );
    }
    if msg.contains("idx_seats_table_user_unique") || msg.contains("seats.table_id, seats.user_id") {
        return DomainError::conflict(
            ConflictKind::AlreadyAtTable,
            "User is already seated at this table",
        );
    }
    DomainError::conflict(
        ConflictKind::Other("Unique".into()),
        "Unique constraint violation",
    )
}

// Adapters return DbErr; this mapping keeps repos/services on DomainError.
impl From<sea_orm::DbErr> for DomainError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err {
            sea_orm::DbErr::RecordNotFound(detail) => {
                DomainError::not_found(NotFoundKind::Other(detail.clone()), detail)
            }
            sea_orm::DbErr::Custom(payload) if payload.starts_with("OPTIMISTIC_LOCK:") => {
                DomainError::conflict(
                    ConflictKind::OptimisticLock,
                    "Resource was modified concurrently. Refresh and retry.",
                )
            }
            other => {
                let msg = other.to_string();
                if is_unique_violation(&msg) {
                    return map_unique_violation(&msg);
                }
                DomainError::infra(InfraErrorKind::DbUnavailable, msg)
            }
        }
    }
}
