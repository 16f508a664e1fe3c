//! Card play: rebuild the authoritative state inside the transaction, run
//! the pure transition, persist the result. Human submissions and watchdog
//! autoplay go through the same internal path.

use rand::seq::IndexedRandom;
use sea_orm::DatabaseTransaction;
use time::OffsetDateTime;
use tracing::{debug, info};

use super::TableFlowService;
use crate::adapters::tables_sea::TableUpdate;
use crate::domain::cards::Card;
use crate::domain::state::TableState;
use crate::domain::tricks::{self, PlayOutcome};
use crate::entities::tables::{TableStatus, WinnerTeam};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, ValidationKind};
use crate::repos::moves::{self, MoveCreate};
use crate::repos::seats::{self, Seat};
use crate::repos::tables::{self, Table};

/// Result of an accepted play: the domain outcome plus the new lock version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayResult {
    pub outcome: PlayOutcome,
    pub version: i32,
}

/// A table mid-game, rebuilt from its rows.
pub(super) struct LiveTable {
    pub table: Table,
    pub seats: Vec<Seat>,
    pub state: TableState,
    pub plays_in_trick: usize,
}

impl TableFlowService {
    /// Submit a card for the seat `user_id` occupies.
    ///
    /// `expected_version` guards against acting on a stale snapshot; when
    /// omitted the play is validated against the current row alone.
    pub async fn play_card(
        &self,
        txn: &DatabaseTransaction,
        table_id: i64,
        user_id: i64,
        card: Card,
        expected_version: Option<i32>,
    ) -> Result<PlayResult, AppError> {
        let seat = seats::find_by_table_and_user(txn, table_id, user_id)
            .await?
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::NotAtTable,
                    format!("User {user_id} is not seated at table {table_id}"),
                )
            })?;
        self.play_card_at_seat(txn, table_id, seat.position, card, expected_version)
            .await
    }

    /// Play for an explicit seat position. Used by [`Self::play_card`] and by
    /// watchdog autoplay, so a timed-out turn is persisted exactly like a
    /// human one.
    pub(super) async fn play_card_at_seat(
        &self,
        txn: &DatabaseTransaction,
        table_id: i64,
        seat_position: u8,
        card: Card,
        expected_version: Option<i32>,
    ) -> Result<PlayResult, AppError> {
        let live = self.load_live_table(txn, table_id, expected_version).await?;
        let LiveTable {
            table,
            seats: seated,
            mut state,
            plays_in_trick,
        } = live;

        let trick_no = state.trick_no;
        let outcome = tricks::play_card(&mut state, seat_position, card)?;

        moves::create_move(
            txn,
            MoveCreate {
                table_id,
                seat: i16::from(seat_position),
                card: card.to_string(),
                round_no: i16::from(table.current_round),
                trick_no: i16::from(trick_no),
                play_order: plays_in_trick as i16,
            },
        )
        .await?;

        let acting = seat_by_position(&seated, seat_position)?;
        seats::update_hand(txn, acting.id, &state.hands[seat_position as usize]).await?;
        if let Some(winner_pos) = outcome.trick_winner {
            let winner_seat = seat_by_position(&seated, winner_pos)?;
            seats::update_hand_and_captured(
                txn,
                winner_seat.id,
                &state.hands[winner_pos as usize],
                &state.captured[winner_pos as usize],
            )
            .await?;
        }

        let mut update = TableUpdate::new(table.id, table.version)
            .with_current_trick(i16::from(state.trick_no))
            .with_current_turn(i16::from(state.turn))
            .with_scores(i16::from(state.score_a), i16::from(state.score_b));
        if outcome.finished {
            // The payout runs in its own transaction; until it lands the
            // table stays SETTLEMENT_PENDING, never FINISHED.
            let winner = outcome.winner.ok_or_else(|| {
                DomainError::infra(InfraErrorKind::DataCorruption, "Finished game has no winner")
            })?;
            update = update
                .with_status(TableStatus::SettlementPending)
                .with_winner(WinnerTeam::from(winner))
                .with_turn_deadline(None);
        } else {
            update = update
                .with_turn_deadline(Some(OffsetDateTime::now_utc() + self.engine.turn_timeout));
        }
        let updated = tables::update_table(txn, update).await?;

        info!(
            table_id,
            seat = seat_position,
            card = %card,
            trick_completed = outcome.trick_completed,
            finished = outcome.finished,
            "card played"
        );
        Ok(PlayResult {
            outcome,
            version: updated.version,
        })
    }

    /// Play a uniformly random legal card for the seat whose turn deadline
    /// has expired. Re-checks the deadline against the row inside the
    /// transaction; a table that moved on since the scan is left alone.
    pub async fn autoplay_expired_turn(
        &self,
        txn: &DatabaseTransaction,
        table_id: i64,
        now: OffsetDateTime,
    ) -> Result<Option<PlayResult>, AppError> {
        let live = self.load_live_table(txn, table_id, None).await?;
        match live.table.turn_deadline_at {
            Some(deadline) if deadline <= now => {}
            _ => return Ok(None),
        }

        let seat_position = live.state.turn;
        let legal = live.state.legal_moves_for(seat_position);
        let card = *legal
            .choose(&mut rand::rng())
            .ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("Seat {seat_position} has no legal card at table {table_id}"),
                )
            })?;

        debug!(table_id, seat = seat_position, card = %card, "autoplaying expired turn");
        let result = self
            .play_card_at_seat(txn, table_id, seat_position, card, Some(live.table.version))
            .await?;
        Ok(Some(result))
    }

    /// Rebuild the in-memory state of a PLAYING table from the table row,
    /// seat hands, and the current trick's moves.
    pub(super) async fn load_live_table(
        &self,
        txn: &DatabaseTransaction,
        table_id: i64,
        expected_version: Option<i32>,
    ) -> Result<LiveTable, AppError> {
        let table = tables::require_table(txn, table_id).await?;

        if let Some(expected) = expected_version {
            if table.version != expected {
                return Err(DomainError::conflict(
                    ConflictKind::OptimisticLock,
                    format!(
                        "Table was modified concurrently (expected version {expected}, actual {})",
                        table.version
                    ),
                )
                .into());
            }
        }
        if table.status != TableStatus::Playing {
            return Err(DomainError::validation(
                ValidationKind::GameNotActive,
                "Table is not in play",
            )
            .into());
        }

        let trump = table.trump.ok_or_else(|| {
            DomainError::infra(InfraErrorKind::DataCorruption, "Playing table has no trump")
        })?;

        let seated = seats::find_all_by_table(txn, table_id).await?;
        if seated.len() != crate::domain::rules::SEATS {
            return Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Playing table has {} seats", seated.len()),
            )
            .into());
        }

        let plays = moves::find_trick_plays(txn, table_id, table.current_trick).await?;

        let mut hands: [Vec<Card>; 4] = Default::default();
        let mut captured: [Vec<Card>; 4] = Default::default();
        for seat in &seated {
            hands[seat.position as usize] = seat.hand.clone();
            captured[seat.position as usize] = seat.captured.clone();
        }

        let state = TableState {
            trump,
            trick_no: table.current_trick,
            turn: table.current_turn,
            hands,
            trick_plays: plays.iter().map(|p| (p.seat, p.card)).collect(),
            captured,
            score_a: table.score_a,
            score_b: table.score_b,
            finished: false,
        };

        Ok(LiveTable {
            table,
            seats: seated,
            state,
            plays_in_trick: plays.len(),
        })
    }
}

fn seat_by_position(seated: &[Seat], position: u8) -> Result<&Seat, DomainError> {
    seated
        .iter()
        .find(|s| s.position == position)
        .ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("No seat row at position {position}"),
            )
        })
}
