//! Table HTTP routes: the thin request layer over the table flow service.
//!
//! Handlers parse input, run the service inside one transaction, fire
//! post-commit hooks, and shape the JSON response. All rules live below.

use actix_web::{web, HttpResponse};
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::db::txn::with_txn;
use crate::domain::cards::parse_card_str;
use crate::domain::rules::Team;
use crate::domain::snapshot::{team_label, PlayPublic, SeatPublic, TableSnapshot};
use crate::entities::tables::{TableStatus, WinnerTeam};
use crate::error::AppError;
use crate::repos::{moves, seats, tables};
use crate::services::table_flow::TableFlowService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct CreateTableRequest {
    user_id: i64,
    /// Stake per seat, integer centavos.
    stake: i64,
}

#[derive(Debug, Serialize)]
struct CreateTableResponse {
    table_id: i64,
    version: i32,
}

/// POST /api/tables
async fn create_table(
    app_state: web::Data<AppState>,
    body: web::Json<CreateTableRequest>,
) -> Result<HttpResponse, AppError> {
    let CreateTableRequest { user_id, stake } = body.into_inner();
    let service = TableFlowService::new(app_state.engine.clone());

    let table = with_txn(&app_state.db, |txn| {
        Box::pin(async move { service.create_table(txn, user_id, stake).await })
    })
    .await?;

    app_state.hooks.notify_wager(table.id, user_id, stake);
    Ok(HttpResponse::Created().json(CreateTableResponse {
        table_id: table.id,
        version: table.version,
    }))
}

#[derive(Debug, Deserialize)]
struct JoinTableRequest {
    user_id: i64,
    /// Optional team preference, `"A"` or `"B"`. Best-effort.
    team: Option<String>,
}

#[derive(Debug, Serialize)]
struct JoinTableResponse {
    joined: bool,
    dealt: bool,
    position: u8,
    version: i32,
}

/// POST /api/tables/{id}/join
async fn join_table(
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<JoinTableRequest>,
) -> Result<HttpResponse, AppError> {
    let table_id = path.into_inner();
    let JoinTableRequest { user_id, team } = body.into_inner();
    let team = team.map(|t| parse_team(&t)).transpose()?;
    let service = TableFlowService::new(app_state.engine.clone());

    let outcome = with_txn(&app_state.db, |txn| {
        Box::pin(async move { service.join_table(txn, table_id, user_id, team).await })
    })
    .await?;

    app_state.hooks.notify_wager(table_id, user_id, outcome.stake);
    Ok(HttpResponse::Ok().json(JoinTableResponse {
        joined: true,
        dealt: outcome.dealt,
        position: outcome.position,
        version: outcome.version,
    }))
}

#[derive(Debug, Deserialize)]
struct PlayCardRequest {
    user_id: i64,
    /// `"{suit}-{rank}"`, e.g. `"hearts-A"`.
    card: String,
    /// Optional optimistic-lock guard from the last snapshot.
    expected_version: Option<i32>,
}

#[derive(Debug, Serialize)]
struct PlayCardResponse {
    accepted: bool,
    trick_completed: bool,
    finished: bool,
    version: i32,
}

/// POST /api/tables/{id}/play
async fn play_card(
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<PlayCardRequest>,
) -> Result<HttpResponse, AppError> {
    let table_id = path.into_inner();
    let PlayCardRequest {
        user_id,
        card,
        expected_version,
    } = body.into_inner();
    let card = parse_card_str(&card)?;
    let service = TableFlowService::new(app_state.engine.clone());

    let play_service = service.clone();
    let result = with_txn(&app_state.db, |txn| {
        Box::pin(async move {
            play_service
                .play_card(txn, table_id, user_id, card, expected_version)
                .await
        })
    })
    .await?;

    // Payout runs in its own transaction after the play has committed. On
    // failure the table stays SETTLEMENT_PENDING and the watchdog retries.
    if result.outcome.finished {
        let settled = with_txn(&app_state.db, |txn| {
            Box::pin(async move { service.settle(txn, table_id).await })
        })
        .await;
        match settled {
            Ok(outcome) => {
                app_state.hooks.notify_settled(
                    table_id,
                    outcome.winner,
                    &outcome.plan,
                    outcome.credits,
                );
            }
            Err(e) => warn!(table_id, error = %e, "settlement deferred to watchdog"),
        }
    }

    Ok(HttpResponse::Ok().json(PlayCardResponse {
        accepted: true,
        trick_completed: result.outcome.trick_completed,
        finished: result.outcome.finished,
        version: result.version,
    }))
}

#[derive(Debug, Deserialize)]
struct CancelTableRequest {
    user_id: i64,
}

#[derive(Debug, Serialize)]
struct CancelTableResponse {
    cancelled: bool,
}

/// POST /api/tables/{id}/cancel
async fn cancel_table(
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<CancelTableRequest>,
) -> Result<HttpResponse, AppError> {
    let table_id = path.into_inner();
    let CancelTableRequest { user_id } = body.into_inner();
    let service = TableFlowService::new(app_state.engine.clone());

    let outcome = with_txn(&app_state.db, |txn| {
        Box::pin(async move { service.cancel_table(txn, table_id, user_id).await })
    })
    .await?;

    for (refunded_user, amount) in outcome.refunds {
        app_state.hooks.notify_refund(table_id, refunded_user, amount);
    }
    Ok(HttpResponse::Ok().json(CancelTableResponse { cancelled: true }))
}

#[derive(Debug, Deserialize)]
struct SnapshotQuery {
    user_id: Option<i64>,
}

/// GET /api/tables/{id}/snapshot
///
/// The authoritative public view. Clients reconcile from this after any
/// rejection. Hidden hands are counts only; the caller's own hand is
/// included when `user_id` matches a seated player.
async fn get_snapshot(
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<SnapshotQuery>,
) -> Result<HttpResponse, AppError> {
    let table_id = path.into_inner();
    let viewer = query.into_inner().user_id;

    let snapshot = with_txn(&app_state.db, |txn| {
        Box::pin(async move {
            let table = tables::require_table(txn, table_id).await?;
            let seated = seats::find_all_by_table(txn, table_id).await?;

            let trick_plays = if table.status == TableStatus::Playing {
                moves::find_trick_plays(txn, table_id, table.current_trick).await?
            } else {
                Vec::new()
            };

            let viewer_seat = viewer.and_then(|uid| seated.iter().find(|s| s.user_id == uid));
            let snapshot = TableSnapshot {
                table_id: table.id,
                status: table.status.to_value(),
                stake: table.stake,
                version: table.version,
                trump: table.trump.map(|s| s.as_str().to_string()),
                current_trick: table.current_trick,
                current_turn: table.current_turn,
                score_a: table.score_a,
                score_b: table.score_b,
                winner: table.winner.map(|w| WinnerTeam::from(w).to_value()),
                turn_deadline_ms: table
                    .turn_deadline_at
                    .map(|d| (d.unix_timestamp_nanos() / 1_000_000) as i64),
                seats: seated
                    .iter()
                    .map(|s| SeatPublic {
                        position: s.position,
                        user_id: s.user_id,
                        team: team_label(s.position),
                        hand_count: s.hand.len() as u8,
                        captured_count: s.captured.len() as u8,
                    })
                    .collect(),
                trick_plays: trick_plays
                    .iter()
                    .map(|p| PlayPublic {
                        seat: p.seat,
                        card: p.card,
                    })
                    .collect(),
                your_position: viewer_seat.map(|s| s.position),
                your_hand: viewer_seat.map(|s| s.hand.clone()),
            };
            Ok(snapshot)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(snapshot))
}

fn parse_team(raw: &str) -> Result<Team, AppError> {
    match raw.to_ascii_uppercase().as_str() {
        "A" => Ok(Team::A),
        "B" => Ok(Team::B),
        _ => Err(AppError::bad_request(
            crate::errors::ErrorCode::BadRequest,
            format!("Team must be \"A\" or \"B\", got {raw:?}"),
        )),
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_table))
        .route("/{table_id}/join", web::post().to(join_table))
        .route("/{table_id}/play", web::post().to(play_card))
        .route("/{table_id}/cancel", web::post().to(cancel_table))
        .route("/{table_id}/snapshot", web::get().to(get_snapshot));
}
