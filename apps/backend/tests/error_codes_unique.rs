//! Every error code string must be unique: clients switch on them.

use std::collections::HashSet;

use backend::ErrorCode;

#[test]
fn error_code_strings_are_unique() {
    let codes = [
        ErrorCode::InvalidStake,
        ErrorCode::ParseCard,
        ErrorCode::ValidationError,
        ErrorCode::BadRequest,
        ErrorCode::NotYourTurn,
        ErrorCode::CardNotInHand,
        ErrorCode::MustFollowSuit,
        ErrorCode::GameNotActive,
        ErrorCode::NotWaiting,
        ErrorCode::NotHost,
        ErrorCode::NotAtTable,
        ErrorCode::InsufficientBalance,
        ErrorCode::TableNotFound,
        ErrorCode::SeatNotFound,
        ErrorCode::WalletNotFound,
        ErrorCode::NotFound,
        ErrorCode::TableFull,
        ErrorCode::AlreadyAtTable,
        ErrorCode::OptimisticLock,
        ErrorCode::Conflict,
        ErrorCode::DbError,
        ErrorCode::DbUnavailable,
        ErrorCode::DataCorruption,
        ErrorCode::Internal,
        ErrorCode::ConfigError,
    ];

    let mut seen = HashSet::new();
    for code in codes {
        assert!(
            seen.insert(code.as_str()),
            "duplicate error code string: {}",
            code.as_str()
        );
        assert_eq!(
            code.as_str(),
            code.as_str().to_uppercase(),
            "error codes are SCREAMING_SNAKE_CASE"
        );
    }
}
