//! Mapping tests: every domain rejection surfaces its own error code and
//! HTTP status through `AppError`.

use actix_web::http::StatusCode;
use sea_orm::DbErr;

use crate::error::AppError;
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::errors::ErrorCode;

fn app(err: DomainError) -> AppError {
    AppError::from(err)
}

#[test]
fn gameplay_rejections_map_to_distinct_codes() {
    let cases = [
        (ValidationKind::NotYourTurn, ErrorCode::NotYourTurn),
        (ValidationKind::CardNotInHand, ErrorCode::CardNotInHand),
        (ValidationKind::MustFollowSuit, ErrorCode::MustFollowSuit),
        (ValidationKind::GameNotActive, ErrorCode::GameNotActive),
        (ValidationKind::InvalidStake, ErrorCode::InvalidStake),
        (
            ValidationKind::InsufficientBalance,
            ErrorCode::InsufficientBalance,
        ),
        (ValidationKind::NotWaiting, ErrorCode::NotWaiting),
        (ValidationKind::NotHost, ErrorCode::NotHost),
        (ValidationKind::NotAtTable, ErrorCode::NotAtTable),
    ];
    for (kind, code) in cases {
        let err = app(DomainError::validation(kind, "rejected"));
        assert_eq!(err.code(), code);
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[test]
fn parse_card_maps_to_parse_card_code() {
    let err = app(DomainError::parse_card("hearts-X"));
    assert_eq!(err.code(), ErrorCode::ParseCard);
    assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn conflicts_map_to_409() {
    let cases = [
        (ConflictKind::TableFull, ErrorCode::TableFull),
        (ConflictKind::AlreadyAtTable, ErrorCode::AlreadyAtTable),
        (ConflictKind::OptimisticLock, ErrorCode::OptimisticLock),
    ];
    for (kind, code) in cases {
        let err = app(DomainError::conflict(kind, "conflict"));
        assert_eq!(err.code(), code);
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }
}

#[test]
fn not_found_maps_to_404() {
    let cases = [
        (NotFoundKind::Table, ErrorCode::TableNotFound),
        (NotFoundKind::Seat, ErrorCode::SeatNotFound),
        (NotFoundKind::Wallet, ErrorCode::WalletNotFound),
    ];
    for (kind, code) in cases {
        let err = app(DomainError::not_found(kind, "missing"));
        assert_eq!(err.code(), code);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}

#[test]
fn infra_maps_to_500() {
    let err = app(DomainError::infra(InfraErrorKind::DbUnavailable, "down"));
    assert_eq!(err.code(), ErrorCode::DbUnavailable);
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn optimistic_lock_db_payload_becomes_conflict() {
    let db_err = DbErr::Custom("OPTIMISTIC_LOCK:tables id=7".to_string());
    let err = AppError::from(db_err);
    assert_eq!(err.code(), ErrorCode::OptimisticLock);
    assert_eq!(err.status(), StatusCode::CONFLICT);
}

#[test]
fn record_not_found_becomes_404() {
    let db_err = DbErr::RecordNotFound("Table not found".to_string());
    let err = AppError::from(db_err);
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[test]
fn seat_unique_violations_become_conflicts() {
    // Postgres wording, constraint name included.
    let pg = DbErr::Custom(
        "error returned from database: duplicate key value violates unique constraint \
         \"idx_seats_table_position_unique\""
            .to_string(),
    );
    let err = AppError::from(pg);
    assert_eq!(err.code(), ErrorCode::TableFull);
    assert_eq!(err.status(), StatusCode::CONFLICT);

    // SQLite wording, table.column list included.
    let sqlite =
        DbErr::Custom("UNIQUE constraint failed: seats.table_id, seats.user_id".to_string());
    let err = AppError::from(sqlite);
    assert_eq!(err.code(), ErrorCode::AlreadyAtTable);
    assert_eq!(err.status(), StatusCode::CONFLICT);
}

#[test]
fn unrecognized_unique_violation_is_still_a_conflict() {
    let db_err = DbErr::Custom(
        "duplicate key value violates unique constraint \"idx_moves_table_trick_order_unique\""
            .to_string(),
    );
    let err = AppError::from(db_err);
    assert_eq!(err.status(), StatusCode::CONFLICT);
}
