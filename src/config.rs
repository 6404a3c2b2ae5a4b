//! Match rule configuration.
//!
//! All knobs are optional for callers; `MatchRules::default()` is the
//! standard 108-card game. The engine validates a configuration once at
//! match creation and rejects anything that cannot cover the shoe.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::Suit;
use crate::domain::deck::SHOE_SIZE;
use crate::errors::EngineError;

/// Number of seats at the table. Fixed by the game.
pub const SEATS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRules {
    /// Opening value of the descending auction.
    pub start_bid: u16,
    /// Lowest value a seat may call.
    pub min_bid: u16,
    /// Auction step; bids must stay on the `start_bid` ladder.
    pub step: u16,
    /// Whether the first seat to act may pass before any bid exists.
    pub allow_opening_pass: bool,
    /// Cards dealt to each seat.
    pub hand_size: u8,
    /// Cards set aside for the declarer's exchange.
    pub kitty_size: u8,
    /// Suits the declarer may name as trump.
    pub trump_options: Vec<Suit>,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            start_bid: 125,
            min_bid: 95,
            step: 5,
            allow_opening_pass: true,
            hand_size: 25,
            kitty_size: 8,
            trump_options: Suit::ALL.to_vec(),
        }
    }
}

impl MatchRules {
    /// Check internal consistency. Performed once when a match is created.
    pub fn validate(&self) -> Result<(), EngineError> {
        let covered = SEATS * self.hand_size as usize + self.kitty_size as usize;
        if covered != SHOE_SIZE {
            return Err(EngineError::invalid_deck(format!(
                "4 x {} + {} = {covered} cards, shoe holds {SHOE_SIZE}",
                self.hand_size, self.kitty_size
            )));
        }
        if self.step == 0 {
            return Err(EngineError::invalid_bid(0, "step must be positive"));
        }
        if self.min_bid > self.start_bid {
            return Err(EngineError::invalid_bid(
                self.min_bid,
                "min bid above start bid",
            ));
        }
        if (self.start_bid - self.min_bid) % self.step != 0 {
            return Err(EngineError::invalid_bid(
                self.min_bid,
                "min bid is off the bid ladder",
            ));
        }
        if self.trump_options.is_empty() {
            return Err(EngineError::invalid_bid(0, "no trump options configured"));
        }
        Ok(())
    }

    /// Whether `amount` sits on the descending ladder at all.
    pub fn on_ladder(&self, amount: u16) -> bool {
        amount <= self.start_bid
            && amount >= self.min_bid
            && (self.start_bid - amount) % self.step == 0
    }
}
