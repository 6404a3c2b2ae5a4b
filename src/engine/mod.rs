//! The engine: a registry of matches, a per-match lock, and the command
//! dispatch that turns validated actions into events.
//!
//! The contract is that no two commands on the same match ever overlap;
//! commands on different matches run in parallel. A `DashMap` keyed by match
//! id holds one mutex per match, and every command locks exactly one entry.

pub mod command;
pub mod event;
pub mod replay;

use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::config::{MatchRules, SEATS};
use crate::domain::deck::{deal, Deck};
use crate::domain::player_view::{view_for, MatchView};
use crate::domain::state::{MatchId, MatchState, PlayerProfile, Seat};
use crate::domain::{bidding, kitty, tricks};
use crate::errors::EngineError;

pub use command::Command;
pub use event::{Event, EventEnvelope};

/// Injected time source. Production uses the system clock; tests pin it.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Optional out-of-band consumer of the event stream. Events are also
/// returned from every successful command.
pub trait EventSink: Send + Sync {
    fn publish(&self, envelope: &EventEnvelope);
}

struct MatchRecord {
    state: MatchState,
    seq: u64,
}

pub struct GameEngine {
    matches: DashMap<MatchId, Arc<Mutex<MatchRecord>>>,
    rng: Mutex<StdRng>,
    clock: Arc<dyn Clock>,
    sink: Option<Arc<dyn EventSink>>,
    rules: MatchRules,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Engine with entropy-seeded shuffles, the system clock, and default
    /// rules.
    pub fn new() -> Self {
        Self {
            matches: DashMap::new(),
            rng: Mutex::new(StdRng::from_os_rng()),
            clock: Arc::new(SystemClock),
            sink: None,
            rules: MatchRules::default(),
        }
    }

    /// Deterministic shuffles for tests and reproduction.
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    pub fn with_rules(self, rules: MatchRules) -> Self {
        Self { rules, ..self }
    }

    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        Self { clock, ..self }
    }

    pub fn with_sink(self, sink: Arc<dyn EventSink>) -> Self {
        Self {
            sink: Some(sink),
            ..self
        }
    }

    /// Create a match, deal, and open the auction. Returns the new id plus
    /// the `MatchStarted` and `CardsDealt` events.
    ///
    /// `first_leader` defaults to the seat that received the first dealt
    /// card; for follow-up matches the caller passes the previous declarer.
    pub fn start_match(
        &self,
        players: [PlayerProfile; SEATS],
        first_leader: Option<Seat>,
    ) -> Result<(MatchId, Vec<EventEnvelope>), EngineError> {
        self.rules.validate()?;

        let mut deck = Deck::standard_shoe();
        {
            let mut rng = self
                .rng
                .lock()
                .map_err(|e| EngineError::Internal(format!("rng lock poisoned: {e}")))?;
            deck.shuffle(&mut *rng);
        }
        let dealt = deal(&deck, &self.rules)?;

        let id = MatchId::generate();
        let now = self.clock.now();
        let first_leader = first_leader.unwrap_or(Seat::North);
        let mut state = MatchState::new(
            id,
            players.clone(),
            self.rules.clone(),
            first_leader,
            now,
        );
        state.apply_deal(dealt.clone())?;

        let mut record = MatchRecord { state, seq: 0 };
        let envelopes = self.emit(
            &mut record,
            now,
            vec![
                Event::MatchStarted {
                    players,
                    rules: self.rules.clone(),
                    first_leader,
                },
                Event::CardsDealt {
                    hands: dealt.hands,
                    kitty: dealt.kitty,
                },
            ],
        );
        self.matches.insert(id, Arc::new(Mutex::new(record)));

        info!(match_id = %id, ?first_leader, "match started");
        Ok((id, envelopes))
    }

    /// Run one command against a match. Commands on the same match are
    /// serialized; on error nothing is mutated and nothing is emitted.
    pub fn dispatch(
        &self,
        match_id: MatchId,
        command: Command,
    ) -> Result<Vec<EventEnvelope>, EngineError> {
        let entry = self
            .matches
            .get(&match_id)
            .map(|r| Arc::clone(r.value()))
            .ok_or(EngineError::MatchUnknown(match_id))?;
        let mut record = entry
            .lock()
            .map_err(|e| EngineError::Internal(format!("match lock poisoned: {e}")))?;

        debug!(
            match_id = %match_id,
            seat = ?command.seat(),
            kind = command.kind_name(),
            "dispatching command"
        );

        let events = apply_command(&mut record.state, &command)?;
        let now = self.clock.now();
        record.state.updated_at = now;
        for event in &events {
            match event {
                Event::BiddingClosed { declarer, contract } => {
                    info!(match_id = %match_id, ?declarer, contract, "bidding closed");
                }
                Event::TrumpDeclared { suit, .. } => {
                    info!(match_id = %match_id, ?suit, "trump declared");
                }
                Event::TrickClosed {
                    trick_no,
                    winner,
                    points,
                } => {
                    debug!(match_id = %match_id, trick_no, ?winner, points, "trick closed");
                }
                Event::MatchEnded { winner_team, .. } => {
                    info!(match_id = %match_id, ?winner_team, "match ended");
                }
                _ => {}
            }
        }
        Ok(self.emit(&mut record, now, events))
    }

    /// Redacted projection for one observer (or a spectator).
    pub fn view(
        &self,
        match_id: MatchId,
        observer: Option<Seat>,
    ) -> Result<MatchView, EngineError> {
        let entry = self
            .matches
            .get(&match_id)
            .map(|r| Arc::clone(r.value()))
            .ok_or(EngineError::MatchUnknown(match_id))?;
        let record = entry
            .lock()
            .map_err(|e| EngineError::Internal(format!("match lock poisoned: {e}")))?;
        Ok(view_for(&record.state, observer))
    }

    /// Full authoritative state, cloned. Server-side only; views are the
    /// redacted surface.
    pub fn state(&self, match_id: MatchId) -> Result<MatchState, EngineError> {
        let entry = self
            .matches
            .get(&match_id)
            .map(|r| Arc::clone(r.value()))
            .ok_or(EngineError::MatchUnknown(match_id))?;
        let record = entry
            .lock()
            .map_err(|e| EngineError::Internal(format!("match lock poisoned: {e}")))?;
        Ok(record.state.clone())
    }

    /// Drop a match from the registry (abandonment; there is no undo).
    pub fn remove_match(&self, match_id: MatchId) -> bool {
        self.matches.remove(&match_id).is_some()
    }

    fn emit(
        &self,
        record: &mut MatchRecord,
        now: OffsetDateTime,
        events: Vec<Event>,
    ) -> Vec<EventEnvelope> {
        let match_id = record.state.id;
        events
            .into_iter()
            .map(|event| {
                record.seq += 1;
                let envelope = EventEnvelope {
                    match_id,
                    seq: record.seq,
                    at: now,
                    event,
                };
                if let Some(sink) = &self.sink {
                    sink.publish(&envelope);
                }
                envelope
            })
            .collect()
    }
}

/// Validate and apply one command to the state, returning the events it
/// produced. Pure with respect to the engine; errors leave state untouched.
fn apply_command(state: &mut MatchState, command: &Command) -> Result<Vec<Event>, EngineError> {
    match command {
        Command::PlaceBid { seat, amount } => {
            let progress = bidding::place_bid(state, *seat, *amount)?;
            let mut events = vec![Event::BidPlaced {
                seat: *seat,
                amount: *amount,
            }];
            if let bidding::AuctionProgress::Closed { declarer, contract } = progress {
                events.push(Event::BiddingClosed { declarer, contract });
            }
            Ok(events)
        }
        Command::Pass { seat } => {
            let progress = bidding::pass(state, *seat)?;
            let mut events = vec![Event::Passed { seat: *seat }];
            if let bidding::AuctionProgress::Closed { declarer, contract } = progress {
                events.push(Event::BiddingClosed { declarer, contract });
            }
            Ok(events)
        }
        Command::DeclareTrump { seat, suit } => {
            kitty::declare_trump(state, *seat, *suit)?;
            Ok(vec![Event::TrumpDeclared {
                seat: *seat,
                suit: *suit,
            }])
        }
        Command::ExchangeKitty { seat, cards } => {
            kitty::exchange_kitty(state, *seat, cards)?;
            Ok(vec![Event::KittyExchanged {
                seat: *seat,
                buried: cards.clone(),
            }])
        }
        Command::PlayFormation { seat, cards } => {
            let progress = tricks::play_formation(state, *seat, cards)?;
            let mut events = vec![Event::TrickPlayed {
                seat: *seat,
                cards: cards.clone(),
            }];
            if let tricks::PlayProgress::TrickClosed {
                trick_no,
                winner,
                points,
                hand_done,
            } = progress
            {
                events.push(Event::TrickClosed {
                    trick_no,
                    winner,
                    points,
                });
                if hand_done {
                    let outcome = state
                        .outcome
                        .ok_or_else(|| EngineError::Internal("settled match lacks outcome".into()))?;
                    events.push(Event::MatchEnded {
                        winner_team: outcome.winner,
                        defenders_points: outcome.defenders_points,
                        kitty_bonus: outcome.kitty_bonus,
                    });
                }
            }
            Ok(events)
        }
    }
}
