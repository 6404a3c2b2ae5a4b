//! Domain layer: pure game rules, no I/O.

pub mod bidding;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod deck;
pub mod formation;
pub mod kitty;
pub mod player_view;
pub mod scoring;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod tests_bidding;
#[cfg(test)]
mod tests_props_cards;
#[cfg(test)]
mod tests_scoring;

// Re-exports for ergonomics
pub use cards_logic::{card_beats, effective_suit, is_trump, trump_rank};
pub use cards_types::{Card, EffectiveSuit, Face, JokerKind, Pack, Rank, Suit};
pub use formation::{Formation, FormationKind};
pub use state::{MatchId, MatchState, Phase, PlayerProfile, Seat, Team};
