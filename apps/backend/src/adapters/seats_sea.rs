//! SeaORM adapter for seats.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, QueryFilter,
    QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::seats;

pub struct SeatCreate {
    pub table_id: i64,
    pub user_id: i64,
    pub position: i16,
}

pub async fn create_seat<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SeatCreate,
) -> Result<seats::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let active = seats::ActiveModel {
        id: NotSet,
        table_id: Set(dto.table_id),
        user_id: Set(dto.user_id),
        position: Set(dto.position),
        hand: Set(serde_json::json!([])),
        captured: Set(serde_json::json!([])),
        created_at: Set(now),
        updated_at: Set(now),
    };
    active.insert(conn).await
}

pub async fn find_all_by_table<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    table_id: i64,
) -> Result<Vec<seats::Model>, sea_orm::DbErr> {
    seats::Entity::find()
        .filter(seats::Column::TableId.eq(table_id))
        .order_by(seats::Column::Position, Order::Asc)
        .all(conn)
        .await
}

pub async fn find_by_table_and_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    table_id: i64,
    user_id: i64,
) -> Result<Option<seats::Model>, sea_orm::DbErr> {
    seats::Entity::find()
        .filter(seats::Column::TableId.eq(table_id))
        .filter(seats::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

/// Replace a seat's hidden hand (set at deal, drained by accepted plays).
pub async fn update_hand<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    seat_id: i64,
    hand: serde_json::Value,
) -> Result<(), sea_orm::DbErr> {
    let active = seats::ActiveModel {
        id: Set(seat_id),
        hand: Set(hand),
        updated_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    };
    active.update(conn).await?;
    Ok(())
}

/// Replace a seat's hand and captured pile together (trick resolution).
pub async fn update_hand_and_captured<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    seat_id: i64,
    hand: serde_json::Value,
    captured: serde_json::Value,
) -> Result<(), sea_orm::DbErr> {
    let active = seats::ActiveModel {
        id: Set(seat_id),
        hand: Set(hand),
        captured: Set(captured),
        updated_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    };
    active.update(conn).await?;
    Ok(())
}
