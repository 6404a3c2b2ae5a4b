//! End-of-hand settlement.
//!
//! Defenders win by capturing points: everything they took in tricks, plus
//! the final kitty if they won the last trick. Meeting the contract is a win
//! for the defense; falling short is a win for the declarer's side.

use serde::{Deserialize, Serialize};

use super::cards_types::Card;
use super::state::{Seat, Team};
use super::tricks::ClosedTrick;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub winner: Team,
    pub defending_team: Team,
    /// Points the defending team captured across tricks (kitty excluded).
    pub defenders_points: u16,
    /// Point value of the final kitty, awarded to the last trick's winners.
    pub kitty_bonus: u16,
    pub last_trick_winner: Team,
    pub contract: u16,
}

impl MatchOutcome {
    /// The value compared against the contract: trick points plus the kitty
    /// bonus when the defenders took the last trick.
    pub fn defenders_total(&self) -> u16 {
        if self.last_trick_winner == self.defending_team {
            self.defenders_points + self.kitty_bonus
        } else {
            self.defenders_points
        }
    }
}

/// Settle a finished hand.
pub fn settle(
    tricks: &[ClosedTrick],
    kitty: &[Card],
    declarer: Seat,
    contract: u16,
) -> MatchOutcome {
    let defending_team = declarer.team().opponent();

    let defenders_points: u16 = tricks
        .iter()
        .filter(|t| t.winner.team() == defending_team)
        .map(|t| t.points)
        .sum();

    let kitty_bonus: u16 = kitty.iter().map(|c| c.points()).sum();

    let last_trick_winner = tricks
        .last()
        .map(|t| t.winner.team())
        .unwrap_or_else(|| declarer.team());

    let total = if last_trick_winner == defending_team {
        defenders_points + kitty_bonus
    } else {
        defenders_points
    };

    let winner = if total >= contract {
        defending_team
    } else {
        declarer.team()
    };

    MatchOutcome {
        winner,
        defending_team,
        defenders_points,
        kitty_bonus,
        last_trick_winner,
        contract,
    }
}
