//! Engine-level error type shared across the domain and dispatch layers.
//!
//! Every failure a command can produce is a distinct variant so callers can
//! translate tags into UI messages without parsing strings. No error is ever
//! panicked across a component boundary; commands return these from the entry
//! point and leave match state untouched.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::cards_types::{Card, Suit};
use crate::domain::state::{MatchId, Phase, Seat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Command does not belong to the match's current phase.
    PhaseError { phase: Phase },
    /// Command issued by a seat that is not on turn.
    TurnError { seat: Seat },
    /// Wire value does not map onto one of the four seats.
    UnknownSeat(u8),
    /// Bid violates range, step, or descending order.
    InvalidBid { amount: u16, detail: String },
    /// Seat already passed, or an opening pass is disallowed.
    PassDenied { seat: Seat, detail: String },
    TrumpAlreadyDeclared,
    TrumpNotDeclared,
    /// Declared suit is outside the configured trump options.
    TrumpNotAllowed { suit: Suit },
    InvalidKittyExchange(String),
    /// Player does not own every card of the proposed play.
    CardsNotInHand { card: Card },
    /// The card set does not classify as Single, Pair, or Tractor.
    InvalidFormation(String),
    WrongFormationSize { expected: usize, got: usize },
    SuitFollowingViolated(String),
    /// Shoe composition check failed.
    InvalidDeck(String),
    /// All four seats passed without any bid being placed.
    BiddingCollapsed,
    /// Any command after the match is over.
    MatchEnded,
    /// Command addressed to a match id the engine does not hold.
    MatchUnknown(MatchId),
    /// Event log handed to replay is malformed or out of order.
    ReplayError(String),
    /// Engine invariant breach (poisoned lock, impossible state).
    Internal(String),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            EngineError::PhaseError { phase } => {
                write!(f, "command not valid in phase {phase:?}")
            }
            EngineError::TurnError { seat } => write!(f, "seat {seat:?} is not on turn"),
            EngineError::UnknownSeat(v) => write!(f, "no seat with index {v}"),
            EngineError::InvalidBid { amount, detail } => {
                write!(f, "invalid bid {amount}: {detail}")
            }
            EngineError::PassDenied { seat, detail } => {
                write!(f, "pass denied for seat {seat:?}: {detail}")
            }
            EngineError::TrumpAlreadyDeclared => write!(f, "trump has already been declared"),
            EngineError::TrumpNotDeclared => write!(f, "trump has not been declared yet"),
            EngineError::TrumpNotAllowed { suit } => {
                write!(f, "suit {suit:?} is not an allowed trump option")
            }
            EngineError::InvalidKittyExchange(d) => write!(f, "invalid kitty exchange: {d}"),
            EngineError::CardsNotInHand { card } => {
                write!(f, "card {card} is not in the player's hand")
            }
            EngineError::InvalidFormation(d) => write!(f, "invalid formation: {d}"),
            EngineError::WrongFormationSize { expected, got } => {
                write!(f, "play has {got} cards, led formation has {expected}")
            }
            EngineError::SuitFollowingViolated(d) => write!(f, "suit following violated: {d}"),
            EngineError::InvalidDeck(d) => write!(f, "invalid deck: {d}"),
            EngineError::BiddingCollapsed => {
                write!(f, "all four seats passed without a bid")
            }
            EngineError::MatchEnded => write!(f, "match is already over"),
            EngineError::MatchUnknown(id) => write!(f, "no match with id {id}"),
            EngineError::ReplayError(d) => write!(f, "replay failed: {d}"),
            EngineError::Internal(d) => write!(f, "internal engine error: {d}"),
        }
    }
}

impl Error for EngineError {}

impl EngineError {
    pub fn invalid_bid(amount: u16, detail: impl Into<String>) -> Self {
        Self::InvalidBid {
            amount,
            detail: detail.into(),
        }
    }

    pub fn pass_denied(seat: Seat, detail: impl Into<String>) -> Self {
        Self::PassDenied {
            seat,
            detail: detail.into(),
        }
    }

    pub fn invalid_formation(detail: impl Into<String>) -> Self {
        Self::InvalidFormation(detail.into())
    }

    pub fn follow_violation(detail: impl Into<String>) -> Self {
        Self::SuitFollowingViolated(detail.into())
    }

    pub fn invalid_deck(detail: impl Into<String>) -> Self {
        Self::InvalidDeck(detail.into())
    }

    pub fn invalid_kitty(detail: impl Into<String>) -> Self {
        Self::InvalidKittyExchange(detail.into())
    }
}
