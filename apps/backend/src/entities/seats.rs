use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "seats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "table_id")]
    pub table_id: i64,
    #[sea_orm(column_name = "user_id")]
    pub user_id: i64,
    /// 0..=3, fixed at join; defines turn order and team (parity).
    #[sea_orm(column_type = "SmallInteger")]
    pub position: i16,
    /// Remaining hidden hand, JSON array of card tokens.
    pub hand: Json,
    /// Cards captured in won tricks, JSON array of card tokens.
    pub captured: Json,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
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
