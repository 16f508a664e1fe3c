//! SeaORM adapter for the append-only move log.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, QueryFilter,
    QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::moves;

pub struct MoveCreate {
    pub table_id: i64,
    pub seat: i16,
    pub card: String,
    pub round_no: i16,
    pub trick_no: i16,
    pub play_order: i16,
}

pub async fn create_move<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MoveCreate,
) -> Result<moves::Model, sea_orm::DbErr> {
    let active = moves::ActiveModel {
        id: NotSet,
        table_id: Set(dto.table_id),
        seat: Set(dto.seat),
        card: Set(dto.card),
        round_no: Set(dto.round_no),
        trick_no: Set(dto.trick_no),
        play_order: Set(dto.play_order),
        played_at: Set(OffsetDateTime::now_utc()),
    };
    active.insert(conn).await
}

/// Plays of one trick in play order; the current trick is rebuilt from this.
pub async fn find_by_table_and_trick<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    table_id: i64,
    trick_no: i16,
) -> Result<Vec<moves::Model>, sea_orm::DbErr> {
    moves::Entity::find()
        .filter(moves::Column::TableId.eq(table_id))
        .filter(moves::Column::TrickNo.eq(trick_no))
        .order_by(moves::Column::PlayOrder, Order::Asc)
        .all(conn)
        .await
}
