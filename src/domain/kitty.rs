//! Trump declaration and the declarer's kitty exchange.

use super::cards_types::{Card, Suit};
use super::state::{MatchState, Phase, Seat};
use crate::errors::EngineError;

/// Name the trump suit. Only the declarer may do this, and only once.
pub fn declare_trump(state: &mut MatchState, seat: Seat, suit: Suit) -> Result<(), EngineError> {
    match state.phase {
        Phase::TrumpDeclaration => {}
        Phase::KittyExchange | Phase::Playing => return Err(EngineError::TrumpAlreadyDeclared),
        Phase::Ended => return Err(EngineError::MatchEnded),
        phase => return Err(EngineError::PhaseError { phase }),
    }
    let declarer = state.require_declarer()?;
    if seat != declarer {
        return Err(EngineError::TurnError { seat });
    }
    if !state.rules.trump_options.contains(&suit) {
        return Err(EngineError::TrumpNotAllowed { suit });
    }

    state.trump = Some(suit);
    state.phase = Phase::KittyExchange;
    state.turn = Some(declarer);
    // The kitty joins the declarer's hand; it comes back on the exchange.
    let kitty = std::mem::take(&mut state.kitty);
    state.seats[declarer.index()].hand.extend(kitty);
    Ok(())
}

/// Bury exactly `kitty_size` cards out of the enlarged hand. The buried
/// cards become the final kitty and play begins with the declarer leading.
pub fn exchange_kitty(
    state: &mut MatchState,
    seat: Seat,
    cards: &[Card],
) -> Result<(), EngineError> {
    match state.phase {
        Phase::KittyExchange => {}
        Phase::TrumpDeclaration => return Err(EngineError::TrumpNotDeclared),
        Phase::Ended => return Err(EngineError::MatchEnded),
        phase => return Err(EngineError::PhaseError { phase }),
    }
    let declarer = state.require_declarer()?;
    if seat != declarer {
        return Err(EngineError::TurnError { seat });
    }
    if cards.len() != state.rules.kitty_size as usize {
        return Err(EngineError::invalid_kitty(format!(
            "exactly {} cards must be buried, got {}",
            state.rules.kitty_size,
            cards.len()
        )));
    }
    state.take_from_hand(declarer, cards).map_err(|e| match e {
        EngineError::CardsNotInHand { card } => {
            EngineError::invalid_kitty(format!("card {card} is not in the declarer's hand"))
        }
        other => other,
    })?;
    state.kitty = cards.to_vec();
    state.phase = Phase::Playing;
    state.turn = Some(declarer);
    state.current_trick = None;
    Ok(())
}
