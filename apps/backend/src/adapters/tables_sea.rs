//! SeaORM adapter for the tables aggregate.

use sea_orm::sea_query::{Alias, Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend, EntityTrait, NotSet, Order,
    QueryFilter, QueryOrder, QuerySelect, Set, Value,
};
use time::OffsetDateTime;

use crate::entities::tables::{self, CardSuit, TableStatus, WinnerTeam};

pub struct TableCreate {
    pub stake: i64,
    pub created_by: i64,
}

/// Builder for optimistic-lock updates of a table row. Every apply bumps
/// `version` and `updated_at`; callers set only the columns they change.
#[derive(Debug, Default)]
pub struct TableUpdate {
    id: i64,
    expected_version: i32,
    status: Option<TableStatus>,
    trump: Option<CardSuit>,
    rng_seed: Option<i64>,
    current_round: Option<i16>,
    current_trick: Option<i16>,
    current_turn: Option<i16>,
    score_a: Option<i16>,
    score_b: Option<i16>,
    winner: Option<WinnerTeam>,
    turn_deadline_at: Option<Option<OffsetDateTime>>,
    started_at: Option<OffsetDateTime>,
    ended_at: Option<OffsetDateTime>,
}

impl TableUpdate {
    pub fn new(id: i64, expected_version: i32) -> Self {
        Self {
            id,
            expected_version,
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: TableStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_trump(mut self, trump: CardSuit) -> Self {
        self.trump = Some(trump);
        self
    }

    pub fn with_rng_seed(mut self, seed: i64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_current_round(mut self, round_no: i16) -> Self {
        self.current_round = Some(round_no);
        self
    }

    pub fn with_current_trick(mut self, trick_no: i16) -> Self {
        self.current_trick = Some(trick_no);
        self
    }

    pub fn with_current_turn(mut self, turn: i16) -> Self {
        self.current_turn = Some(turn);
        self
    }

    pub fn with_scores(mut self, score_a: i16, score_b: i16) -> Self {
        self.score_a = Some(score_a);
        self.score_b = Some(score_b);
        self
    }

    pub fn with_winner(mut self, winner: WinnerTeam) -> Self {
        self.winner = Some(winner);
        self
    }

    pub fn with_turn_deadline(mut self, deadline: Option<OffsetDateTime>) -> Self {
        self.turn_deadline_at = Some(deadline);
        self
    }

    pub fn with_started_at(mut self, at: OffsetDateTime) -> Self {
        self.started_at = Some(at);
        self
    }

    pub fn with_ended_at(mut self, at: OffsetDateTime) -> Self {
        self.ended_at = Some(at);
        self
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    table_id: i64,
) -> Result<Option<tables::Model>, sea_orm::DbErr> {
    tables::Entity::find_by_id(table_id).one(conn).await
}

/// Find table by ID or return RecordNotFound.
pub async fn require_table<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    table_id: i64,
) -> Result<tables::Model, sea_orm::DbErr> {
    find_by_id(conn, table_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Table not found".to_string()))
}

pub async fn create_table<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TableCreate,
) -> Result<tables::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let active = tables::ActiveModel {
        id: NotSet,
        status: Set(TableStatus::Waiting),
        stake: Set(dto.stake),
        created_by: Set(dto.created_by),
        trump: Set(None),
        rng_seed: Set(None),
        current_round: Set(0),
        current_trick: Set(0),
        current_turn: Set(0),
        score_a: Set(0),
        score_b: Set(0),
        winner: Set(None),
        turn_deadline_at: Set(None),
        version: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
        started_at: Set(None),
        ended_at: Set(None),
    };
    active.insert(conn).await
}

/// Bind an enum value for a raw column expression. Postgres enum columns
/// reject plain text binds, so the value is cast to its enum type there;
/// SQLite stores these columns as TEXT and gets the bare value.
fn enum_val(backend: DatabaseBackend, value: impl Into<Value>, enum_type: &str) -> SimpleExpr {
    if backend == DatabaseBackend::Postgres {
        Expr::val(value).cast_as(Alias::new(enum_type))
    } else {
        Expr::val(value).into()
    }
}

/// Apply an optimistic update, then refetch.
///
/// Adds the `version` increment and `updated_at` touch, filters by id and
/// the expected version, and uses `rows_affected` to distinguish NotFound
/// from a lost optimistic-lock race.
pub async fn update_table<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TableUpdate,
) -> Result<tables::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let backend = conn.get_database_backend();

    let mut update = tables::Entity::update_many()
        .col_expr(tables::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            tables::Column::Version,
            Expr::col(tables::Column::Version).add(1),
        );

    if let Some(status) = dto.status {
        update = update.col_expr(
            tables::Column::Status,
            enum_val(backend, status, "table_status"),
        );
    }
    if let Some(trump) = dto.trump {
        update = update.col_expr(tables::Column::Trump, enum_val(backend, trump, "card_suit"));
    }
    if let Some(round_no) = dto.current_round {
        update = update.col_expr(tables::Column::CurrentRound, Expr::val(round_no).into());
    }
    if let Some(seed) = dto.rng_seed {
        update = update.col_expr(tables::Column::RngSeed, Expr::val(seed).into());
    }
    if let Some(trick_no) = dto.current_trick {
        update = update.col_expr(tables::Column::CurrentTrick, Expr::val(trick_no).into());
    }
    if let Some(turn) = dto.current_turn {
        update = update.col_expr(tables::Column::CurrentTurn, Expr::val(turn).into());
    }
    if let Some(score_a) = dto.score_a {
        update = update.col_expr(tables::Column::ScoreA, Expr::val(score_a).into());
    }
    if let Some(score_b) = dto.score_b {
        update = update.col_expr(tables::Column::ScoreB, Expr::val(score_b).into());
    }
    if let Some(winner) = dto.winner {
        update = update.col_expr(
            tables::Column::Winner,
            enum_val(backend, winner, "winner_team"),
        );
    }
    if let Some(deadline) = dto.turn_deadline_at {
        update = update.col_expr(tables::Column::TurnDeadlineAt, Expr::val(deadline).into());
    }
    if let Some(at) = dto.started_at {
        update = update.col_expr(tables::Column::StartedAt, Expr::val(at).into());
    }
    if let Some(at) = dto.ended_at {
        update = update.col_expr(tables::Column::EndedAt, Expr::val(at).into());
    }

    let result = update
        .filter(tables::Column::Id.eq(dto.id))
        .filter(tables::Column::Version.eq(dto.expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        let table = find_by_id(conn, dto.id).await?;
        if let Some(table) = table {
            let payload = format!(
                "OPTIMISTIC_LOCK:{{\"expected\":{},\"actual\":{}}}",
                dto.expected_version, table.version
            );
            return Err(sea_orm::DbErr::Custom(payload));
        }
        return Err(sea_orm::DbErr::RecordNotFound("Table not found".to_string()));
    }

    require_table(conn, dto.id).await
}

/// PLAYING tables whose turn deadline has passed, oldest deadline first.
pub async fn find_expired_turns<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
    limit: u64,
) -> Result<Vec<tables::Model>, sea_orm::DbErr> {
    tables::Entity::find()
        .filter(tables::Column::Status.eq(TableStatus::Playing))
        .filter(tables::Column::TurnDeadlineAt.lte(now))
        .order_by(tables::Column::TurnDeadlineAt, Order::Asc)
        .limit(limit)
        .all(conn)
        .await
}

/// Tables that finished trick 10 but still owe their payout.
pub async fn find_settlement_pending<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<tables::Model>, sea_orm::DbErr> {
    tables::Entity::find()
        .filter(tables::Column::Status.eq(TableStatus::SettlementPending))
        .order_by(tables::Column::UpdatedAt, Order::Asc)
        .limit(limit)
        .all(conn)
        .await
}
