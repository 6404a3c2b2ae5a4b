//! Formation recognition: the atomic playable units.
//!
//! A play is a Single, a Pair (two face-equal cards), or a Tractor (k >= 2
//! face-equal pairs of one suit with strictly consecutive ranks). Tractors
//! never contain 2s or jokers; trump promotes those out of the rank run.
//! The recognizer judges only the card set itself, never the hand behind it.

use serde::{Deserialize, Serialize};

use super::cards_logic::{effective_suit, trump_rank};
use super::cards_types::{Card, EffectiveSuit, Face, Rank, Suit};
use crate::errors::EngineError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormationKind {
    Single,
    Pair,
    Tractor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formation {
    Single(Card),
    Pair([Card; 2]),
    /// Face-equal pairs in ascending rank order.
    Tractor(Vec<[Card; 2]>),
}

impl Formation {
    /// Classify a card set, or fail with `InvalidFormation`.
    pub fn classify(cards: &[Card]) -> Result<Formation, EngineError> {
        match cards.len() {
            0 => Err(EngineError::invalid_formation("empty card set")),
            1 => Ok(Formation::Single(cards[0])),
            2 => {
                if cards[0].face_eq(cards[1]) {
                    Ok(Formation::Pair([cards[0], cards[1]]))
                } else {
                    Err(EngineError::invalid_formation(
                        "two cards must be face-equal to form a pair",
                    ))
                }
            }
            n if n % 2 == 0 => classify_tractor(cards),
            _ => Err(EngineError::invalid_formation(
                "odd card count cannot form a pair or tractor",
            )),
        }
    }

    pub fn kind(&self) -> FormationKind {
        match self {
            Formation::Single(_) => FormationKind::Single,
            Formation::Pair(_) => FormationKind::Pair,
            Formation::Tractor(_) => FormationKind::Tractor,
        }
    }

    pub fn card_count(&self) -> usize {
        match self {
            Formation::Single(_) => 1,
            Formation::Pair(_) => 2,
            Formation::Tractor(pairs) => pairs.len() * 2,
        }
    }

    /// Pair count of a tractor; 1 for a pair, 0 for a single.
    pub fn pair_len(&self) -> usize {
        match self {
            Formation::Single(_) => 0,
            Formation::Pair(_) => 1,
            Formation::Tractor(pairs) => pairs.len(),
        }
    }

    pub fn cards(&self) -> Vec<Card> {
        match self {
            Formation::Single(card) => vec![*card],
            Formation::Pair(pair) => pair.to_vec(),
            Formation::Tractor(pairs) => pairs.iter().flatten().copied().collect(),
        }
    }

    /// The effective suit this formation leads or follows as.
    pub fn base_suit(&self, trump: Suit) -> EffectiveSuit {
        let first = match self {
            Formation::Single(card) => *card,
            Formation::Pair(pair) => pair[0],
            Formation::Tractor(pairs) => pairs[0][0],
        };
        effective_suit(first, trump)
    }

    /// Highest card under the trump hierarchy, natural rank as tiebreak.
    pub fn highest_card(&self, trump: Suit) -> Card {
        self.cards()
            .into_iter()
            .max_by_key(|&c| (trump_rank(c, trump), c.natural_rank()))
            .expect("formations are never empty")
    }

    pub fn points(&self) -> u16 {
        self.cards().iter().map(|c| c.points()).sum()
    }
}

fn classify_tractor(cards: &[Card]) -> Result<Formation, EngineError> {
    debug_assert!(cards.len() >= 4 && cards.len() % 2 == 0);

    let mut suit: Option<Suit> = None;
    for card in cards {
        match card.face {
            Face::Joker(_) => {
                return Err(EngineError::invalid_formation(
                    "tractors may not contain jokers",
                ))
            }
            Face::Standard { rank: Rank::Two, .. } => {
                return Err(EngineError::invalid_formation("tractors may not contain 2s"))
            }
            Face::Standard { suit: s, .. } => match suit {
                None => suit = Some(s),
                Some(prev) if prev != s => {
                    return Err(EngineError::invalid_formation(
                        "tractor pairs must share one suit",
                    ))
                }
                Some(_) => {}
            },
        }
    }

    // Group the cards by rank; every rank must appear exactly twice.
    let mut sorted = cards.to_vec();
    sorted.sort_by_key(|c| (c.natural_rank(), c.pack));
    let mut pairs: Vec<[Card; 2]> = Vec::with_capacity(sorted.len() / 2);
    for chunk in sorted.chunks(2) {
        if !chunk[0].face_eq(chunk[1]) {
            return Err(EngineError::invalid_formation(
                "tractor ranks must each appear exactly twice",
            ));
        }
        pairs.push([chunk[0], chunk[1]]);
    }
    for window in pairs.windows(2) {
        let lo = window[0][0].natural_rank();
        let hi = window[1][0].natural_rank();
        if hi != lo + 1 {
            return Err(EngineError::invalid_formation(
                "tractor pairs must be strictly consecutive",
            ));
        }
    }
    Ok(Formation::Tractor(pairs))
}
