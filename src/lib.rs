//! Rules engine and match state machine for Chinese Bridge (biaofen).
//!
//! Four players in fixed partnerships play a 108-card shoe (two packs plus
//! four jokers) through a descending-bid auction, a trump declaration, the
//! declarer's kitty exchange, and 25 formation-based tricks. This crate is
//! the authoritative core: it validates every action against the rules and
//! the acting player's hand, mutates a single per-match state tree, and
//! emits an ordered event stream that callers may persist and replay.
//!
//! The engine is a passive library. It performs no I/O and holds no global
//! state; randomness and time are injected, and transport, rooms, and
//! persistence belong to the caller.
//!
//! ```no_run
//! use biaofen_engine::domain::state::{PlayerProfile, Seat};
//! use biaofen_engine::engine::{Command, GameEngine};
//!
//! let engine = GameEngine::new();
//! let players = ["n", "e", "s", "w"].map(|id| PlayerProfile {
//!     id: id.into(),
//!     name: id.to_uppercase(),
//! });
//! let (match_id, _events) = engine.start_match(players, None)?;
//! engine.dispatch(
//!     match_id,
//!     Command::PlaceBid {
//!         seat: Seat::North,
//!         amount: 120,
//!     },
//! )?;
//! # Ok::<(), biaofen_engine::errors::EngineError>(())
//! ```

pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;

pub use config::MatchRules;
pub use domain::{Card, Face, Formation, FormationKind, JokerKind, Pack, Rank, Suit};
pub use domain::{MatchId, MatchState, Phase, PlayerProfile, Seat, Team};
pub use engine::{Command, Event, EventEnvelope, GameEngine};
pub use errors::EngineError;
