use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Append-only move log; the source of truth for trick reconstruction.
/// Rows are never updated or deleted while a table exists.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "moves")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "table_id")]
    pub table_id: i64,
    #[sea_orm(column_type = "SmallInteger")]
    pub seat: i16,
    /// Card token, e.g. "hearts-A".
    pub card: String,
    #[sea_orm(column_name = "round_no", column_type = "SmallInteger")]
    pub round_no: i16,
    #[sea_orm(column_name = "trick_no", column_type = "SmallInteger")]
    pub trick_no: i16,
    #[sea_orm(column_name = "play_order", column_type = "SmallInteger")]
    pub play_order: i16,
    #[sea_orm(column_name = "played_at")]
    pub played_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tables::Entity",
        from = "Column::TableId",
        to = "super::tables::Column::Id"
    )]
    Table,
}

impl Related<super::tables::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Table.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
