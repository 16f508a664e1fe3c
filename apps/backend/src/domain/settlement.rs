//! Pure escrow/payout arithmetic. All amounts are integer centavos.

use crate::domain::rules::Team;
use crate::domain::state::GameWinner;

/// Where the pot goes when a table terminates normally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementPlan {
    /// Winning pair splits the pot net of rake.
    Payout {
        pot: i64,
        rake: i64,
        /// (seat position, amount), one entry per winning seat.
        credits: [(u8, i64); 2],
    },
    /// 60-60 draw: every seat gets its stake back in full, no rake.
    DrawRefund { credits: [(u8, i64); 4] },
}

impl SettlementPlan {
    pub fn rake(&self) -> i64 {
        match self {
            SettlementPlan::Payout { rake, .. } => *rake,
            SettlementPlan::DrawRefund { .. } => 0,
        }
    }

    pub fn credits(&self) -> &[(u8, i64)] {
        match self {
            SettlementPlan::Payout { credits, .. } => credits,
            SettlementPlan::DrawRefund { credits } => credits,
        }
    }
}

/// Compute the settlement for a finished game.
///
/// Pot = stake x 4. Rake = pot x rake_bps / 10_000, integer division; the
/// division remainder stays in the prize so no centavo leaves the pot except
/// as rake. The prize splits evenly between the two winning seats, odd
/// centavo to the lower position (deterministic).
pub fn plan_settlement(stake: i64, rake_bps: u16, winner: GameWinner) -> SettlementPlan {
    let pot = stake * 4;
    match winner {
        GameWinner::Draw => SettlementPlan::DrawRefund {
            credits: [(0, stake), (1, stake), (2, stake), (3, stake)],
        },
        team_winner => {
            let team = match team_winner {
                GameWinner::TeamA => Team::A,
                GameWinner::TeamB => Team::B,
                GameWinner::Draw => unreachable!(),
            };
            let rake = pot * i64::from(rake_bps) / 10_000;
            let prize = pot - rake;
            let high = prize / 2;
            let low = prize - high;
            let [p0, p1] = team.positions();
            SettlementPlan::Payout {
                pot,
                rake,
                credits: [(p0, low), (p1, high)],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payout_splits_pot_net_of_rake() {
        // stake 5.00, pot 20.00, 10% rake -> 2.00, 9.00 each
        let plan = plan_settlement(500, 1000, GameWinner::TeamA);
        assert_eq!(
            plan,
            SettlementPlan::Payout {
                pot: 2000,
                rake: 200,
                credits: [(0, 900), (2, 900)],
            }
        );
    }

    #[test]
    fn odd_centavo_goes_to_lower_seat() {
        // pot 404, rake 40 (9.9% floor of 1000bps on 404? 404*1000/10000 = 40),
        // prize 364 -> 182/182; force an odd prize with rake_bps 999
        let plan = plan_settlement(101, 999, GameWinner::TeamB);
        let SettlementPlan::Payout { pot, rake, credits } = plan else {
            panic!("expected payout");
        };
        assert_eq!(pot, 404);
        assert_eq!(rake, 404 * 999 / 10_000);
        assert_eq!(credits[0].0, 1);
        assert_eq!(credits[1].0, 3);
        assert_eq!(credits[0].1 + credits[1].1, pot - rake);
        assert!(credits[0].1 >= credits[1].1);
    }

    #[test]
    fn nothing_minted_nothing_lost() {
        for stake in [1i64, 7, 100, 12345] {
            for bps in [1000u16, 1500, 2000] {
                let plan = plan_settlement(stake, bps, GameWinner::TeamA);
                let credited: i64 = plan.credits().iter().map(|(_, amt)| amt).sum();
                assert_eq!(credited + plan.rake(), stake * 4);
            }
        }
    }

    #[test]
    fn draw_refunds_everyone_without_rake() {
        let plan = plan_settlement(750, 1500, GameWinner::Draw);
        assert_eq!(plan.rake(), 0);
        assert_eq!(
            plan.credits(),
            &[(0, 750), (1, 750), (2, 750), (3, 750)][..]
        );
    }
}
