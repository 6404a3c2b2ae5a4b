//! Auction behavior: descending calls, pass discipline, closure, collapse.

use super::bidding::{legal_bids, pass, place_bid, AuctionProgress};
use super::state::{Phase, Seat};
use super::test_state_helpers::bidding_state;
use crate::config::MatchRules;
use crate::errors::EngineError;

fn empty_hands() -> [Vec<super::cards_types::Card>; 4] {
    [vec![], vec![], vec![], vec![]]
}

#[test]
fn auction_walkthrough_closes_on_third_seat_out() {
    // North 120, East pass, South 115, West pass, North pass:
    // East is already out, so South declares at 115.
    let mut state = bidding_state(empty_hands(), Seat::North);

    assert_eq!(
        place_bid(&mut state, Seat::North, 120).unwrap(),
        AuctionProgress::Open
    );
    assert_eq!(pass(&mut state, Seat::East).unwrap(), AuctionProgress::Open);
    assert_eq!(
        place_bid(&mut state, Seat::South, 115).unwrap(),
        AuctionProgress::Open
    );
    assert_eq!(pass(&mut state, Seat::West).unwrap(), AuctionProgress::Open);
    assert_eq!(
        pass(&mut state, Seat::North).unwrap(),
        AuctionProgress::Closed {
            declarer: Seat::South,
            contract: 115
        }
    );

    assert_eq!(state.phase, Phase::TrumpDeclaration);
    assert_eq!(state.declarer, Some(Seat::South));
    assert_eq!(state.contract, 115);
    assert_eq!(state.turn, Some(Seat::South));
}

#[test]
fn turn_skips_seats_that_passed() {
    let mut state = bidding_state(empty_hands(), Seat::North);

    pass(&mut state, Seat::North).unwrap();
    assert_eq!(state.turn, Some(Seat::East));
    place_bid(&mut state, Seat::East, 120).unwrap();
    assert_eq!(state.turn, Some(Seat::South));
    place_bid(&mut state, Seat::South, 110).unwrap();
    // West passes; rotation must skip North, who is already out.
    pass(&mut state, Seat::West).unwrap();
    assert_eq!(state.turn, Some(Seat::East));
}

#[test]
fn bid_boundaries() {
    let mut state = bidding_state(empty_hands(), Seat::North);

    // Off the ladder or out of range.
    assert!(matches!(
        place_bid(&mut state, Seat::North, 122),
        Err(EngineError::InvalidBid { amount: 122, .. })
    ));
    assert!(matches!(
        place_bid(&mut state, Seat::North, 90),
        Err(EngineError::InvalidBid { .. })
    ));
    // Must undercut the standing value; the opening 125 is not biddable.
    assert!(matches!(
        place_bid(&mut state, Seat::North, 125),
        Err(EngineError::InvalidBid { .. })
    ));

    // The minimum itself is legal.
    place_bid(&mut state, Seat::North, 95).unwrap();
    assert_eq!(state.auction.current_bid, 95);

    // Nothing undercuts the floor.
    assert!(matches!(
        place_bid(&mut state, Seat::East, 90),
        Err(EngineError::InvalidBid { .. })
    ));
    // Re-bidding the standing value is rejected.
    assert!(matches!(
        place_bid(&mut state, Seat::East, 95),
        Err(EngineError::InvalidBid { .. })
    ));
}

#[test]
fn state_untouched_on_rejected_bid() {
    let mut state = bidding_state(empty_hands(), Seat::North);
    place_bid(&mut state, Seat::North, 120).unwrap();
    let before = state.clone();

    assert!(place_bid(&mut state, Seat::East, 125).is_err());
    assert!(place_bid(&mut state, Seat::West, 110).is_err()); // out of turn
    assert_eq!(state, before);
}

#[test]
fn out_of_turn_and_wrong_phase() {
    let mut state = bidding_state(empty_hands(), Seat::North);
    assert_eq!(
        place_bid(&mut state, Seat::South, 120),
        Err(EngineError::TurnError { seat: Seat::South })
    );

    state.phase = Phase::Waiting;
    assert!(matches!(
        place_bid(&mut state, Seat::North, 120),
        Err(EngineError::PhaseError { .. })
    ));
    assert!(matches!(
        pass(&mut state, Seat::North),
        Err(EngineError::PhaseError { .. })
    ));
}

#[test]
fn passed_seat_cannot_pass_again() {
    let mut state = bidding_state(empty_hands(), Seat::North);
    pass(&mut state, Seat::North).unwrap();
    // Force the turn back to make the discipline check observable.
    state.turn = Some(Seat::North);
    assert!(matches!(
        pass(&mut state, Seat::North),
        Err(EngineError::PassDenied { seat: Seat::North, .. })
    ));
}

#[test]
fn opening_pass_can_be_disallowed() {
    let mut state = bidding_state(empty_hands(), Seat::North);
    state.rules = MatchRules {
        allow_opening_pass: false,
        ..state.rules.clone()
    };

    assert!(matches!(
        pass(&mut state, Seat::North),
        Err(EngineError::PassDenied { .. })
    ));
    // A bid unlocks passing for later seats.
    place_bid(&mut state, Seat::North, 120).unwrap();
    pass(&mut state, Seat::East).unwrap();
}

#[test]
fn four_opening_passes_collapse() {
    let mut state = bidding_state(empty_hands(), Seat::North);
    pass(&mut state, Seat::North).unwrap();
    pass(&mut state, Seat::East).unwrap();
    pass(&mut state, Seat::South).unwrap();

    let before = state.clone();
    assert_eq!(
        pass(&mut state, Seat::West),
        Err(EngineError::BiddingCollapsed)
    );
    // The collapsing pass mutates nothing; the caller decides what happens.
    assert_eq!(state, before);
    assert_eq!(state.phase, Phase::Bidding);
    assert_eq!(state.auction.passed_count(), 3);
}

#[test]
fn fourth_seat_can_still_rescue_the_auction() {
    let mut state = bidding_state(empty_hands(), Seat::North);
    pass(&mut state, Seat::North).unwrap();
    pass(&mut state, Seat::East).unwrap();
    pass(&mut state, Seat::South).unwrap();

    // Three seats out, no bid yet: West may still call.
    assert_eq!(
        place_bid(&mut state, Seat::West, 120).unwrap(),
        AuctionProgress::Open
    );
    assert_eq!(state.auction.current_bid, 120);
    assert_eq!(state.auction.last_bidder, Some(Seat::West));

    // West is the only live seat; a pass now closes on their own bid.
    assert_eq!(
        pass(&mut state, Seat::West).unwrap(),
        AuctionProgress::Closed {
            declarer: Seat::West,
            contract: 120
        }
    );
    assert_eq!(state.phase, Phase::TrumpDeclaration);
}

#[test]
fn legal_bid_listing() {
    let mut state = bidding_state(empty_hands(), Seat::North);
    let all: Vec<u16> = (95..=120).step_by(5).collect();
    assert_eq!(legal_bids(&state), all);

    place_bid(&mut state, Seat::North, 105).unwrap();
    assert_eq!(legal_bids(&state), vec![95, 100]);

    place_bid(&mut state, Seat::East, 95).unwrap();
    assert!(legal_bids(&state).is_empty());

    state.phase = Phase::Waiting;
    assert!(legal_bids(&state).is_empty());
}

#[test]
fn history_records_every_action() {
    use super::bidding::{BidAction, BidEntry};

    let mut state = bidding_state(empty_hands(), Seat::North);
    place_bid(&mut state, Seat::North, 120).unwrap();
    pass(&mut state, Seat::East).unwrap();
    place_bid(&mut state, Seat::South, 115).unwrap();

    assert_eq!(
        state.auction.history,
        vec![
            BidEntry {
                seat: Seat::North,
                action: BidAction::Bid(120)
            },
            BidEntry {
                seat: Seat::East,
                action: BidAction::Pass
            },
            BidEntry {
                seat: Seat::South,
                action: BidAction::Bid(115)
            },
        ]
    );
    assert_eq!(state.auction.consecutive_passes, 0);
}
