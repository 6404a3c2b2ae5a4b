//! Per-observer projection of a match.
//!
//! The view hides what the observer may not see: other seats' hands show
//! only counts, and the kitty stays face-down until the match has ended.
//! During the exchange the kitty cards sit in the declarer's hand, so the
//! declarer (and nobody else) sees them there.

use serde::Serialize;

use super::bidding::{legal_bids, BidEntry};
use super::cards_types::{Card, Suit};
use super::formation::FormationKind;
use super::scoring::MatchOutcome;
use super::state::{MatchId, MatchState, Phase, PlayerProfile, Seat};
use super::tricks::{ClosedTrick, TrickPlay};
use crate::config::SEATS;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatView {
    pub seat: Seat,
    pub player: PlayerProfile,
    pub hand_count: usize,
    /// Present only for the observer's own seat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand: Option<Vec<Card>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuctionView {
    pub current_bid: u16,
    pub history: Vec<BidEntry>,
    pub passed: [bool; SEATS],
    pub consecutive_passes: u8,
    /// What the seat on turn could call right now.
    pub legal_bids: Vec<u16>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayView {
    pub seat: Seat,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentTrickView {
    pub leader: Seat,
    pub led_kind: FormationKind,
    pub plays: Vec<PlayView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrickSummary {
    pub leader: Seat,
    pub winner: Seat,
    pub points: u16,
    pub plays: Vec<PlayView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchView {
    pub match_id: MatchId,
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observer: Option<Seat>,
    pub turn: Option<Seat>,
    pub seats: Vec<SeatView>,
    pub auction: AuctionView,
    pub declarer: Option<Seat>,
    pub trump: Option<Suit>,
    pub contract: u16,
    /// 1-based number of the open trick while playing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trick_no: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_trick: Option<CurrentTrickView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_trick: Option<TrickSummary>,
    pub kitty_count: usize,
    /// The final kitty, face-up once the match has ended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kitty: Option<Vec<Card>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<MatchOutcome>,
}

fn play_views(plays: &[TrickPlay]) -> Vec<PlayView> {
    plays
        .iter()
        .map(|p| PlayView {
            seat: p.seat,
            cards: p.cards.clone(),
        })
        .collect()
}

fn summarize(trick: &ClosedTrick) -> TrickSummary {
    TrickSummary {
        leader: trick.leader,
        winner: trick.winner,
        points: trick.points,
        plays: play_views(&trick.plays),
    }
}

/// Project the state for one observer. `None` is a spectator: no hand at
/// all is revealed.
pub fn view_for(state: &MatchState, observer: Option<Seat>) -> MatchView {
    let seats = Seat::ALL
        .iter()
        .map(|&seat| {
            let hand = &state.seats[seat.index()].hand;
            SeatView {
                seat,
                player: state.seats[seat.index()].profile.clone(),
                hand_count: hand.len(),
                hand: (observer == Some(seat)).then(|| hand.clone()),
            }
        })
        .collect();

    let auction = AuctionView {
        current_bid: state.auction.current_bid,
        history: state.auction.history.clone(),
        passed: state.auction.passed,
        consecutive_passes: state.auction.consecutive_passes,
        legal_bids: legal_bids(state),
    };

    let current_trick = state.current_trick.as_ref().map(|t| CurrentTrickView {
        leader: t.leader,
        led_kind: t.led_kind,
        plays: play_views(&t.plays),
    });

    MatchView {
        match_id: state.id,
        phase: state.phase,
        observer,
        turn: state.turn,
        seats,
        auction,
        declarer: state.declarer,
        trump: state.trump,
        contract: state.contract,
        trick_no: (state.phase == Phase::Playing).then(|| state.current_trick_no()),
        current_trick,
        last_trick: state.tricks.last().map(summarize),
        kitty_count: state.kitty.len(),
        kitty: (state.phase == Phase::Ended).then(|| state.kitty.clone()),
        outcome: state.outcome,
    }
}
