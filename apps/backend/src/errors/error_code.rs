//! Error codes for the table-engine API.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses. Add new codes here; never pass ad-hoc strings
//! as error codes.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request validation
    /// Stake must be positive
    InvalidStake,
    /// Unparseable card token
    ParseCard,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Gameplay rejections
    /// Out of turn
    NotYourTurn,
    /// Card not in hand
    CardNotInHand,
    /// Must follow suit
    MustFollowSuit,
    /// Table is not in PLAYING status
    GameNotActive,
    /// Table is not in WAITING status
    NotWaiting,
    /// Only the host may perform this action
    NotHost,
    /// Acting user holds no seat at this table
    NotAtTable,

    // Balance
    /// Spendable balance does not cover the stake
    InsufficientBalance,

    // Resource not found
    /// Table not found
    TableNotFound,
    /// Seat not found
    SeatNotFound,
    /// Wallet not found
    WalletNotFound,
    /// General not found error
    NotFound,

    // Business logic conflicts
    /// Table already has four seats
    TableFull,
    /// User already holds a seat at this table
    AlreadyAtTable,
    /// Optimistic lock conflict
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Data corruption detected
    DataCorruption,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidStake => "INVALID_STAKE",
            ErrorCode::ParseCard => "PARSE_CARD",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::NotYourTurn => "NOT_YOUR_TURN",
            ErrorCode::CardNotInHand => "CARD_NOT_IN_HAND",
            ErrorCode::MustFollowSuit => "MUST_FOLLOW_SUIT",
            ErrorCode::GameNotActive => "GAME_NOT_ACTIVE",
            ErrorCode::NotWaiting => "NOT_WAITING",
            ErrorCode::NotHost => "NOT_HOST",
            ErrorCode::NotAtTable => "NOT_AT_TABLE",
            ErrorCode::InsufficientBalance => "INSUFFICIENT_BALANCE",
            ErrorCode::TableNotFound => "TABLE_NOT_FOUND",
            ErrorCode::SeatNotFound => "SEAT_NOT_FOUND",
            ErrorCode::WalletNotFound => "WALLET_NOT_FOUND",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::TableFull => "TABLE_FULL",
            ErrorCode::AlreadyAtTable => "ALREADY_AT_TABLE",
            ErrorCode::OptimisticLock => "OPTIMISTIC_LOCK",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::DbError => "DB_ERROR",
            ErrorCode::DbUnavailable => "DB_UNAVAILABLE",
            ErrorCode::DataCorruption => "DATA_CORRUPTION",
            ErrorCode::Internal => "INTERNAL",
            ErrorCode::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
