//! Rebuild match state from a persisted event log.
//!
//! Replay drives the same domain mutators as live dispatch, so a log
//! produced by the engine folds back into a state equal to the original.
//! Derived events (`BiddingClosed`, `TrickClosed`, `MatchEnded`) are checked
//! against what the fold itself produced.

use super::event::{Event, EventEnvelope};
use crate::domain::deck::Deal;
use crate::domain::state::MatchState;
use crate::domain::{bidding, kitty, tricks};
use crate::errors::EngineError;

pub fn replay(log: &[EventEnvelope]) -> Result<MatchState, EngineError> {
    let mut iter = log.iter();
    let first = iter
        .next()
        .ok_or_else(|| EngineError::ReplayError("empty event log".into()))?;
    if first.seq != 1 {
        return Err(EngineError::ReplayError(format!(
            "log must start at seq 1, got {}",
            first.seq
        )));
    }

    let mut state = match &first.event {
        Event::MatchStarted {
            players,
            rules,
            first_leader,
        } => MatchState::new(
            first.match_id,
            players.clone(),
            rules.clone(),
            *first_leader,
            first.at,
        ),
        other => {
            return Err(EngineError::ReplayError(format!(
                "log must open with match_started, got {}",
                other.kind_name()
            )))
        }
    };

    let mut expected_seq = first.seq;
    for envelope in iter {
        expected_seq += 1;
        if envelope.seq != expected_seq {
            return Err(EngineError::ReplayError(format!(
                "sequence gap: expected {expected_seq}, got {}",
                envelope.seq
            )));
        }
        if envelope.match_id != state.id {
            return Err(EngineError::ReplayError(format!(
                "event for match {} in log of match {}",
                envelope.match_id, state.id
            )));
        }

        match &envelope.event {
            Event::MatchStarted { .. } => {
                return Err(EngineError::ReplayError(
                    "match_started appears mid-log".into(),
                ))
            }
            Event::CardsDealt { hands, kitty } => {
                state.apply_deal(Deal {
                    hands: hands.clone(),
                    kitty: kitty.clone(),
                })?;
            }
            Event::BidPlaced { seat, amount } => {
                bidding::place_bid(&mut state, *seat, *amount)?;
            }
            Event::Passed { seat } => {
                bidding::pass(&mut state, *seat)?;
            }
            Event::BiddingClosed { declarer, contract } => {
                if state.declarer != Some(*declarer) || state.contract != *contract {
                    return Err(EngineError::ReplayError(
                        "bidding_closed disagrees with replayed auction".into(),
                    ));
                }
            }
            Event::TrumpDeclared { seat, suit } => {
                kitty::declare_trump(&mut state, *seat, *suit)?;
            }
            Event::KittyExchanged { seat, buried } => {
                kitty::exchange_kitty(&mut state, *seat, buried)?;
            }
            Event::TrickPlayed { seat, cards } => {
                tricks::play_formation(&mut state, *seat, cards)?;
            }
            Event::TrickClosed {
                trick_no, winner, ..
            } => {
                let closed = trick_no
                    .checked_sub(1)
                    .and_then(|i| state.tricks.get(i))
                    .ok_or_else(|| {
                        EngineError::ReplayError(format!(
                            "trick_closed for unknown trick {trick_no}"
                        ))
                    })?;
                if closed.winner != *winner {
                    return Err(EngineError::ReplayError(
                        "trick_closed disagrees with replayed winner".into(),
                    ));
                }
            }
            Event::MatchEnded { winner_team, .. } => {
                let outcome = state.outcome.ok_or_else(|| {
                    EngineError::ReplayError("match_ended before the final trick".into())
                })?;
                if outcome.winner != *winner_team {
                    return Err(EngineError::ReplayError(
                        "match_ended disagrees with replayed outcome".into(),
                    ));
                }
            }
        }
        state.updated_at = envelope.at;
    }

    Ok(state)
}
