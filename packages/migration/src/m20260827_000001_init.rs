use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{DatabaseBackend, Statement};
use sea_orm_migration::sea_query::extension::postgres::Type as PgType;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----

#[derive(Iden)]
enum Wallets {
    Table,
    UserId,
    Balance,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Tables {
    Table,
    Id,
    Status,
    Stake,
    CreatedBy,
    Trump,
    RngSeed,
    CurrentRound,
    CurrentTrick,
    CurrentTurn,
    ScoreA,
    ScoreB,
    Winner,
    TurnDeadlineAt,
    Version,
    CreatedAt,
    UpdatedAt,
    StartedAt,
    EndedAt,
}

#[derive(Iden)]
enum Seats {
    Table,
    Id,
    TableId,
    UserId,
    Position,
    Hand,
    Captured,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Moves {
    Table,
    Id,
    TableId,
    Seat,
    Card,
    RoundNo,
    TrickNo,
    PlayOrder,
    PlayedAt,
}

#[derive(Iden)]
enum TableStatusEnum {
    #[iden = "table_status"]
    Type,
}

#[derive(Iden)]
enum CardSuitEnum {
    #[iden = "card_suit"]
    Type,
}

#[derive(Iden)]
enum WinnerTeamEnum {
    #[iden = "winner_team"]
    Type,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Enum types (Postgres only; SQLite stores them as TEXT)
        if manager.get_database_backend() == DatabaseBackend::Postgres {
            async fn enum_exists(manager: &SchemaManager<'_>, enum_name: &str) -> Result<bool, DbErr> {
                let result = manager
                    .get_connection()
                    .query_one(Statement::from_string(
                        DatabaseBackend::Postgres,
                        format!("SELECT 1 FROM pg_type WHERE typname = '{}'", enum_name),
                    ))
                    .await?;
                Ok(result.is_some())
            }

            if !enum_exists(manager, "table_status").await? {
                manager
                    .create_type(
                        PgType::create()
                            .as_enum(TableStatusEnum::Type)
                            .values([
                                "WAITING",
                                "PLAYING",
                                "SETTLEMENT_PENDING",
                                "FINISHED",
                                "CANCELLED",
                            ])
                            .to_owned(),
                    )
                    .await?;
            }

            if !enum_exists(manager, "card_suit").await? {
                manager
                    .create_type(
                        PgType::create()
                            .as_enum(CardSuitEnum::Type)
                            .values(["CLUBS", "DIAMONDS", "HEARTS", "SPADES"])
                            .to_owned(),
                    )
                    .await?;
            }

            if !enum_exists(manager, "winner_team").await? {
                manager
                    .create_type(
                        PgType::create()
                            .as_enum(WinnerTeamEnum::Type)
                            .values(["TEAM_A", "TEAM_B", "DRAW"])
                            .to_owned(),
                    )
                    .await?;
            }
        }

        // wallets: the in-house ledger the engine escrows against
        manager
            .create_table(
                Table::create()
                    .table(Wallets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Wallets::UserId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Wallets::Balance)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Wallets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Wallets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // tables: the game aggregate
        manager
            .create_table(
                Table::create()
                    .table(Tables::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tables::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(Tables::Status)
                            .custom(TableStatusEnum::Type)
                            .not_null()
                            .default("WAITING"),
                    )
                    .col(ColumnDef::new(Tables::Stake).big_integer().not_null())
                    .col(ColumnDef::new(Tables::CreatedBy).big_integer().not_null())
                    .col(
                        ColumnDef::new(Tables::Trump)
                            .custom(CardSuitEnum::Type)
                            .null(),
                    )
                    .col(ColumnDef::new(Tables::RngSeed).big_integer().null())
                    .col(
                        ColumnDef::new(Tables::CurrentRound)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Tables::CurrentTrick)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Tables::CurrentTurn)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Tables::ScoreA)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Tables::ScoreB)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Tables::Winner)
                            .custom(WinnerTeamEnum::Type)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Tables::TurnDeadlineAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Tables::Version)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Tables::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tables::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tables::StartedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Tables::EndedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Watchdog scan: PLAYING tables with an expired deadline
        manager
            .create_index(
                Index::create()
                    .name("idx_tables_status_turn_deadline")
                    .table(Tables::Table)
                    .col(Tables::Status)
                    .col(Tables::TurnDeadlineAt)
                    .to_owned(),
            )
            .await?;

        // seats
        manager
            .create_table(
                Table::create()
                    .table(Seats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Seats::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Seats::TableId).big_integer().not_null())
                    .col(ColumnDef::new(Seats::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Seats::Position).small_integer().not_null())
                    .col(ColumnDef::new(Seats::Hand).json_binary().not_null())
                    .col(ColumnDef::new(Seats::Captured).json_binary().not_null())
                    .col(
                        ColumnDef::new(Seats::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Seats::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seats_table_id")
                            .from(Seats::Table, Seats::TableId)
                            .to(Tables::Table, Tables::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_seats_table_position_unique")
                    .table(Seats::Table)
                    .col(Seats::TableId)
                    .col(Seats::Position)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_seats_table_user_unique")
                    .table(Seats::Table)
                    .col(Seats::TableId)
                    .col(Seats::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // moves: append-only play log
        manager
            .create_table(
                Table::create()
                    .table(Moves::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Moves::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Moves::TableId).big_integer().not_null())
                    .col(ColumnDef::new(Moves::Seat).small_integer().not_null())
                    .col(ColumnDef::new(Moves::Card).string_len(16).not_null())
                    .col(ColumnDef::new(Moves::RoundNo).small_integer().not_null())
                    .col(ColumnDef::new(Moves::TrickNo).small_integer().not_null())
                    .col(ColumnDef::new(Moves::PlayOrder).small_integer().not_null())
                    .col(
                        ColumnDef::new(Moves::PlayedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_moves_table_id")
                            .from(Moves::Table, Moves::TableId)
                            .to(Tables::Table, Tables::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_moves_table_trick_order_unique")
                    .table(Moves::Table)
                    .col(Moves::TableId)
                    .col(Moves::RoundNo)
                    .col(Moves::TrickNo)
                    .col(Moves::PlayOrder)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop indexes before tables
        manager
            .drop_index(
                Index::drop()
                    .name("idx_moves_table_trick_order_unique")
                    .table(Moves::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Moves::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_seats_table_user_unique")
                    .table(Seats::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_seats_table_position_unique")
                    .table(Seats::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Seats::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_tables_status_turn_deadline")
                    .table(Tables::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Tables::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Wallets::Table).to_owned())
            .await?;

        if manager.get_database_backend() == DatabaseBackend::Postgres {
            manager
                .drop_type(PgType::drop().name(WinnerTeamEnum::Type).to_owned())
                .await?;
            manager
                .drop_type(PgType::drop().name(CardSuitEnum::Type).to_owned())
                .await?;
            manager
                .drop_type(PgType::drop().name(TableStatusEnum::Type).to_owned())
                .await?;
        }

        Ok(())
    }
}
