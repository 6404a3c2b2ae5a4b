//! Match state: phases, seats, teams, and the single state tree.
//!
//! Seats and tricks are addressed by index; the partner relationship is
//! computed, never stored. All mutation goes through the domain operations
//! (bidding, kitty, tricks), which check phase and turn before touching
//! anything.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use ulid::Ulid;

use super::bidding::AuctionState;
use super::cards_types::{Card, Suit};
use super::deck::Deal;
use super::scoring::MatchOutcome;
use super::tricks::{ClosedTrick, TrickState};
use crate::config::{MatchRules, SEATS};
use crate::errors::EngineError;

/// Identifier of a match, unique per engine instance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId(Ulid);

impl MatchId {
    pub fn generate() -> Self {
        Self(Ulid::new())
    }
}

impl Display for MatchId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.0.fmt(f)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Waiting,
    Dealing,
    Bidding,
    TrumpDeclaration,
    KittyExchange,
    Playing,
    Ended,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Seat {
    North,
    East,
    South,
    West,
}

impl Seat {
    pub const ALL: [Seat; SEATS] = [Seat::North, Seat::East, Seat::South, Seat::West];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Next seat clockwise.
    pub fn next(self) -> Seat {
        Seat::ALL[(self.index() + 1) % SEATS]
    }

    pub fn partner(self) -> Seat {
        Seat::ALL[(self.index() + 2) % SEATS]
    }

    pub fn team(self) -> Team {
        match self {
            Seat::North | Seat::South => Team::NorthSouth,
            Seat::East | Seat::West => Team::EastWest,
        }
    }
}

impl TryFrom<u8> for Seat {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Seat::ALL
            .get(value as usize)
            .copied()
            .ok_or(EngineError::UnknownSeat(value))
    }
}

/// Fixed partnerships by seat parity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Team {
    NorthSouth,
    EastWest,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::NorthSouth => Team::EastWest,
            Team::EastWest => Team::NorthSouth,
        }
    }
}

/// External identity of a seated player. The seat is authoritative for all
/// rule checks; the identity is payload for views and the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatedPlayer {
    pub profile: PlayerProfile,
    pub hand: Vec<Card>,
}

/// The complete, server-authoritative state of one match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchState {
    pub id: MatchId,
    pub rules: MatchRules,
    pub seats: [SeatedPlayer; SEATS],
    pub phase: Phase,
    /// First seat to act in the auction.
    pub first_leader: Seat,
    /// Seat expected to act, if anyone is.
    pub turn: Option<Seat>,
    pub auction: AuctionState,
    pub declarer: Option<Seat>,
    pub trump: Option<Suit>,
    pub contract: u16,
    pub kitty: Vec<Card>,
    pub tricks: Vec<ClosedTrick>,
    pub current_trick: Option<TrickState>,
    pub outcome: Option<MatchOutcome>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl MatchState {
    pub fn new(
        id: MatchId,
        players: [PlayerProfile; SEATS],
        rules: MatchRules,
        first_leader: Seat,
        now: OffsetDateTime,
    ) -> Self {
        let auction = AuctionState::open_at(rules.start_bid);
        let seats = players.map(|profile| SeatedPlayer {
            profile,
            hand: Vec::new(),
        });
        Self {
            id,
            rules,
            seats,
            phase: Phase::Waiting,
            first_leader,
            turn: None,
            auction,
            declarer: None,
            trump: None,
            contract: 0,
            kitty: Vec::new(),
            tricks: Vec::new(),
            current_trick: None,
            outcome: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn hand(&self, seat: Seat) -> &[Card] {
        &self.seats[seat.index()].hand
    }

    /// Install a completed deal and open the auction with the first leader.
    pub fn apply_deal(&mut self, deal: Deal) -> Result<(), EngineError> {
        self.require_phase(Phase::Waiting)?;
        self.phase = Phase::Dealing;
        for (slot, hand) in self.seats.iter_mut().zip(deal.hands) {
            slot.hand = hand;
        }
        self.kitty = deal.kitty;
        self.phase = Phase::Bidding;
        self.turn = Some(self.first_leader);
        Ok(())
    }

    /// 1-based number of the trick currently open (or about to open).
    pub fn current_trick_no(&self) -> usize {
        self.tricks.len() + 1
    }

    /// Phase gate for a command. An ended match reports `MatchEnded` for
    /// everything; any other mismatch is a `PhaseError`.
    pub fn require_phase(&self, phase: Phase) -> Result<(), EngineError> {
        if self.phase == phase {
            Ok(())
        } else if self.phase == Phase::Ended {
            Err(EngineError::MatchEnded)
        } else {
            Err(EngineError::PhaseError { phase: self.phase })
        }
    }

    pub fn require_turn(&self, seat: Seat) -> Result<(), EngineError> {
        if self.turn != Some(seat) {
            return Err(EngineError::TurnError { seat });
        }
        Ok(())
    }

    pub fn require_declarer(&self) -> Result<Seat, EngineError> {
        self.declarer.ok_or(EngineError::TrumpNotDeclared)
    }

    pub fn require_trump(&self) -> Result<Suit, EngineError> {
        self.trump.ok_or(EngineError::TrumpNotDeclared)
    }

    /// Check that `cards` (as a multiset) all sit in `seat`'s hand.
    pub fn check_owns(&self, seat: Seat, cards: &[Card]) -> Result<(), EngineError> {
        let mut remaining = self.seats[seat.index()].hand.clone();
        for card in cards {
            match remaining.iter().position(|held| held == card) {
                Some(pos) => {
                    remaining.swap_remove(pos);
                }
                None => return Err(EngineError::CardsNotInHand { card: *card }),
            }
        }
        Ok(())
    }

    /// Remove `cards` (as a multiset) from `seat`'s hand. Callers check
    /// ownership first; a miss here is a bug, not a rule violation.
    pub fn take_from_hand(&mut self, seat: Seat, cards: &[Card]) -> Result<(), EngineError> {
        self.check_owns(seat, cards)?;
        let hand = &mut self.seats[seat.index()].hand;
        for card in cards {
            let pos = hand
                .iter()
                .position(|held| held == card)
                .expect("ownership was just checked");
            hand.remove(pos);
        }
        Ok(())
    }

    /// Defending seats: the two not on the declarer's team.
    pub fn defenders(&self) -> Result<[Seat; 2], EngineError> {
        let declarer = self.require_declarer()?;
        let mut out = [Seat::North; 2];
        let mut i = 0;
        for seat in Seat::ALL {
            if seat.team() != declarer.team() {
                out[i] = seat;
                i += 1;
            }
        }
        Ok(out)
    }
}
