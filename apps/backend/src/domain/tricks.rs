//! The single pure transition of the trick-play phase.

use crate::domain::cards::Card;
use crate::domain::rules::{next_seat, trick_points, trick_winner, Team, SEATS, TRICKS_PER_GAME};
use crate::domain::state::{GameWinner, TableState};
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of an accepted play, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOutcome {
    /// Whether this play completed a trick (4 cards on the table).
    pub trick_completed: bool,
    /// Winner of the completed trick, if one was completed.
    pub trick_winner: Option<u8>,
    /// Point value of the completed trick.
    pub trick_points: u8,
    /// Whether this was the 10th trick, ending the game.
    pub finished: bool,
    /// Terminal result when `finished`.
    pub winner: Option<GameWinner>,
}

/// Play a card into the current trick, enforcing turn order and suit
/// following. Every rejection leaves `state` untouched, so a retry after a
/// rejection can never corrupt the table.
pub fn play_card(state: &mut TableState, seat: u8, card: Card) -> Result<PlayOutcome, DomainError> {
    if state.finished {
        return Err(DomainError::validation(
            ValidationKind::GameNotActive,
            "Game already finished",
        ));
    }

    if state.turn != seat {
        return Err(DomainError::validation(
            ValidationKind::NotYourTurn,
            format!("Seat {} to act, not seat {seat}", state.turn),
        ));
    }

    // Card in hand (immutable check first; nothing is mutated before all
    // checks pass)
    let pos_opt = state.hands[seat as usize].iter().position(|&c| c == card);
    let Some(pos) = pos_opt else {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("Card {card} is not in seat {seat}'s hand"),
        ));
    };

    if let Some(lead) = state.lead_suit() {
        if !crate::domain::rules::is_legal(card, &state.hands[seat as usize], Some(lead)) {
            return Err(DomainError::validation(
                ValidationKind::MustFollowSuit,
                format!("Must follow {} while holding it", lead.as_str()),
            ));
        }
    }

    // All checks passed; move the card into the trick
    let removed = state.hands[seat as usize].remove(pos);
    state.trick_plays.push((seat, removed));

    if state.trick_plays.len() < SEATS {
        state.turn = next_seat(seat);
        return Ok(PlayOutcome {
            trick_completed: false,
            trick_winner: None,
            trick_points: 0,
            finished: false,
            winner: None,
        });
    }

    // Fourth card: resolve the trick
    let winner_seat = trick_winner(&state.trick_plays, state.trump)
        .ok_or_else(|| DomainError::validation_other("trick resolution on empty trick"))?;
    let points = trick_points(&state.trick_plays);

    state.add_score(Team::for_position(winner_seat), points);
    let captured: Vec<Card> = state.trick_plays.drain(..).map(|(_, c)| c).collect();
    state.captured[winner_seat as usize].extend(captured);

    let finished = state.trick_no == TRICKS_PER_GAME;
    if finished {
        state.finished = true;
    } else {
        state.trick_no += 1;
        state.turn = winner_seat;
    }

    Ok(PlayOutcome {
        trick_completed: true,
        trick_winner: Some(winner_seat),
        trick_points: points,
        finished,
        winner: state.winner(),
    })
}
