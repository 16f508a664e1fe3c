//! Domain layer: pure Sueca rules, state, and arithmetic. No I/O.

pub mod cards;
pub mod dealing;
pub mod rules;
pub mod settlement;
pub mod snapshot;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_props_legality;
#[cfg(test)]
mod tests_props_tricks;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use cards::{card_beats, hand_has_suit, parse_card_str, Card, Rank, Suit};
pub use rules::Team;
pub use state::{GameWinner, TableState};
