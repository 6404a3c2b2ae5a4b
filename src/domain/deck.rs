//! The 108-card shoe: composition, shuffling, and the deal.

use rand::Rng;

use super::cards_types::{Card, Face, JokerKind, Pack, Rank, Suit};
use crate::config::{MatchRules, SEATS};
use crate::errors::EngineError;

/// Two 52-card packs plus four jokers.
pub const SHOE_SIZE: usize = 108;

/// Total point value of a full shoe: eight kings, eight tens, eight fives.
pub const SHOE_POINTS: u16 = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build an unshuffled shoe: both packs of every face, then the jokers.
    pub fn standard_shoe() -> Self {
        let mut cards = Vec::with_capacity(SHOE_SIZE);
        for pack in Pack::BOTH {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::standard(suit, rank, pack));
                }
            }
        }
        for pack in Pack::BOTH {
            cards.push(Card::joker(JokerKind::Big, pack));
            cards.push(Card::joker(JokerKind::Small, pack));
        }
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn total_points(&self) -> u16 {
        self.cards.iter().map(|c| c.points()).sum()
    }

    /// Uniform Fisher-Yates over the injected random source.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.random_range(0..=i);
            self.cards.swap(i, j);
        }
    }

    /// Recount every face and joker. Fails if any face does not appear
    /// exactly twice or the shoe size is off.
    pub fn validate_composition(&self) -> Result<(), EngineError> {
        if self.cards.len() != SHOE_SIZE {
            return Err(EngineError::invalid_deck(format!(
                "shoe must hold {SHOE_SIZE} cards, found {}",
                self.cards.len()
            )));
        }

        let mut standard = [[0u8; 13]; 4];
        let mut jokers = [0u8; 2];
        for card in &self.cards {
            match card.face {
                Face::Standard { suit, rank } => {
                    standard[suit as usize][rank as usize] += 1;
                }
                Face::Joker(kind) => jokers[kind as usize] += 1,
            }
        }

        for suit in Suit::ALL {
            for rank in Rank::ALL {
                let count = standard[suit as usize][rank as usize];
                if count != 2 {
                    return Err(EngineError::invalid_deck(format!(
                        "{rank:?} of {suit:?} appears {count} times, expected 2"
                    )));
                }
            }
        }
        for kind in [JokerKind::Big, JokerKind::Small] {
            let count = jokers[kind as usize];
            if count != 2 {
                return Err(EngineError::invalid_deck(format!(
                    "{kind:?} joker appears {count} times, expected 2"
                )));
            }
        }
        Ok(())
    }
}

/// A completed deal: four hands plus the kitty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub hands: [Vec<Card>; SEATS],
    pub kitty: Vec<Card>,
}

/// Split a shuffled shoe into hands and kitty. Hand `i` takes positions
/// `4k + i`; the final `kitty_size` cards are set aside.
pub fn deal(deck: &Deck, rules: &MatchRules) -> Result<Deal, EngineError> {
    deck.validate_composition()?;

    let hand_size = rules.hand_size as usize;
    let dealt = SEATS * hand_size;
    let mut hands: [Vec<Card>; SEATS] = Default::default();
    for hand in hands.iter_mut() {
        hand.reserve(hand_size);
    }
    for (pos, &card) in deck.cards()[..dealt].iter().enumerate() {
        hands[pos % SEATS].push(card);
    }
    let kitty = deck.cards()[dealt..].to_vec();
    Ok(Deal { hands, kitty })
}
