//! The tagged command surface of the engine.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::{Card, Suit};
use crate::domain::state::Seat;

/// A player action against a running match. Match creation is its own entry
/// point on the engine; everything after the deal arrives as one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    PlaceBid { seat: Seat, amount: u16 },
    Pass { seat: Seat },
    DeclareTrump { seat: Seat, suit: Suit },
    ExchangeKitty { seat: Seat, cards: Vec<Card> },
    PlayFormation { seat: Seat, cards: Vec<Card> },
}

impl Command {
    pub fn seat(&self) -> Seat {
        match self {
            Command::PlaceBid { seat, .. }
            | Command::Pass { seat }
            | Command::DeclareTrump { seat, .. }
            | Command::ExchangeKitty { seat, .. }
            | Command::PlayFormation { seat, .. } => *seat,
        }
    }

    /// Stable tag for logging.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Command::PlaceBid { .. } => "place_bid",
            Command::Pass { .. } => "pass",
            Command::DeclareTrump { .. } => "declare_trump",
            Command::ExchangeKitty { .. } => "exchange_kitty",
            Command::PlayFormation { .. } => "play_formation",
        }
    }
}
