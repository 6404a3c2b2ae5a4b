//! The descending auction.
//!
//! Bidding opens at `start_bid` and every call must undercut the standing
//! bid along the configured ladder. A seat that passes is out for the rest
//! of the auction and is skipped in rotation. The auction closes once three
//! seats are out and a bid exists: the last bidder declares at the standing
//! value.

use serde::{Deserialize, Serialize};

use super::state::{MatchState, Phase, Seat};
use crate::errors::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "amount", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BidAction {
    Bid(u16),
    Pass,
}

/// One auction action, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidEntry {
    pub seat: Seat,
    pub action: BidAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionState {
    /// Standing value; `start_bid` until the first call undercuts it.
    pub current_bid: u16,
    pub history: Vec<BidEntry>,
    /// Passes since the most recent bid.
    pub consecutive_passes: u8,
    pub passed: [bool; 4],
    pub last_bidder: Option<Seat>,
}

impl AuctionState {
    pub fn open_at(start_bid: u16) -> Self {
        Self {
            current_bid: start_bid,
            history: Vec::new(),
            consecutive_passes: 0,
            passed: [false; 4],
            last_bidder: None,
        }
    }

    pub fn has_bid(&self) -> bool {
        self.last_bidder.is_some()
    }

    pub fn passed_count(&self) -> usize {
        self.passed.iter().filter(|&&p| p).count()
    }
}

/// Result of a successful auction action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuctionProgress {
    Open,
    Closed { declarer: Seat, contract: u16 },
}

/// All values `seat` could legally call right now, ascending. Empty outside
/// the bidding phase. Turn order is not consulted; `place_bid` enforces it.
pub fn legal_bids(state: &MatchState) -> Vec<u16> {
    if state.phase != Phase::Bidding {
        return Vec::new();
    }
    let rules = &state.rules;
    let mut out = Vec::new();
    let mut v = rules.min_bid;
    while v < state.auction.current_bid {
        out.push(v);
        v += rules.step;
    }
    out
}

pub fn place_bid(
    state: &mut MatchState,
    seat: Seat,
    amount: u16,
) -> Result<AuctionProgress, EngineError> {
    state.require_phase(Phase::Bidding)?;
    state.require_turn(seat)?;
    if state.auction.passed[seat.index()] {
        return Err(EngineError::invalid_bid(amount, "seat has already passed"));
    }
    if !state.rules.on_ladder(amount) {
        return Err(EngineError::invalid_bid(
            amount,
            format!(
                "bid must step down by {} within [{}, {}]",
                state.rules.step, state.rules.min_bid, state.rules.start_bid
            ),
        ));
    }
    if amount >= state.auction.current_bid {
        return Err(EngineError::invalid_bid(
            amount,
            format!("bid must undercut the standing {}", state.auction.current_bid),
        ));
    }

    state.auction.current_bid = amount;
    state.auction.last_bidder = Some(seat);
    state.auction.consecutive_passes = 0;
    state.auction.history.push(BidEntry {
        seat,
        action: BidAction::Bid(amount),
    });
    advance_auction_turn(state);
    Ok(AuctionProgress::Open)
}

pub fn pass(state: &mut MatchState, seat: Seat) -> Result<AuctionProgress, EngineError> {
    state.require_phase(Phase::Bidding)?;
    state.require_turn(seat)?;
    if state.auction.passed[seat.index()] {
        return Err(EngineError::pass_denied(seat, "seat has already passed"));
    }
    if !state.auction.has_bid() {
        if !state.rules.allow_opening_pass {
            return Err(EngineError::pass_denied(
                seat,
                "configuration requires the opening seat to bid",
            ));
        }
        // Fourth pass with nothing on the table: the auction collapsed.
        // The state is left untouched; redeal policy belongs to the caller.
        if state.auction.passed_count() == 3 {
            return Err(EngineError::BiddingCollapsed);
        }
    }

    state.auction.passed[seat.index()] = true;
    state.auction.consecutive_passes += 1;
    state.auction.history.push(BidEntry {
        seat,
        action: BidAction::Pass,
    });

    if state.auction.has_bid() && state.auction.passed_count() >= 3 {
        let declarer = state
            .auction
            .last_bidder
            .expect("has_bid() implies a last bidder");
        let contract = state.auction.current_bid;
        state.declarer = Some(declarer);
        state.contract = contract;
        state.phase = Phase::TrumpDeclaration;
        state.turn = Some(declarer);
        return Ok(AuctionProgress::Closed { declarer, contract });
    }

    advance_auction_turn(state);
    Ok(AuctionProgress::Open)
}

/// Rotate to the next seat still in the auction.
fn advance_auction_turn(state: &mut MatchState) {
    let Some(mut seat) = state.turn else { return };
    for _ in 0..4 {
        seat = seat.next();
        if !state.auction.passed[seat.index()] {
            state.turn = Some(seat);
            return;
        }
    }
}
