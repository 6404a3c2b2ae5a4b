//! Events and their envelopes.
//!
//! The event stream is the single source of truth a caller may persist:
//! per match it is a total order with a gap-free sequence starting at 1,
//! and `replay` rebuilds the exact state from it.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::config::{MatchRules, SEATS};
use crate::domain::cards_types::{Card, Suit};
use crate::domain::state::{MatchId, PlayerProfile, Seat, Team};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Event {
    MatchStarted {
        players: [PlayerProfile; SEATS],
        rules: MatchRules,
        first_leader: Seat,
    },
    /// The full deal. The log is server-side truth, not a broadcast; views
    /// are the redacted surface.
    CardsDealt {
        hands: [Vec<Card>; SEATS],
        kitty: Vec<Card>,
    },
    BidPlaced {
        seat: Seat,
        amount: u16,
    },
    Passed {
        seat: Seat,
    },
    BiddingClosed {
        declarer: Seat,
        contract: u16,
    },
    TrumpDeclared {
        seat: Seat,
        suit: Suit,
    },
    KittyExchanged {
        seat: Seat,
        buried: Vec<Card>,
    },
    TrickPlayed {
        seat: Seat,
        cards: Vec<Card>,
    },
    TrickClosed {
        trick_no: usize,
        winner: Seat,
        points: u16,
    },
    MatchEnded {
        winner_team: Team,
        defenders_points: u16,
        kitty_bonus: u16,
    },
}

impl Event {
    /// Stable tag for logging.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Event::MatchStarted { .. } => "match_started",
            Event::CardsDealt { .. } => "cards_dealt",
            Event::BidPlaced { .. } => "bid_placed",
            Event::Passed { .. } => "passed",
            Event::BiddingClosed { .. } => "bidding_closed",
            Event::TrumpDeclared { .. } => "trump_declared",
            Event::KittyExchanged { .. } => "kitty_exchanged",
            Event::TrickPlayed { .. } => "trick_played",
            Event::TrickClosed { .. } => "trick_closed",
            Event::MatchEnded { .. } => "match_ended",
        }
    }
}

/// An event with its position in the match's stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub match_id: MatchId,
    /// 1-based, contiguous within a match.
    pub seq: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
    pub event: Event,
}
