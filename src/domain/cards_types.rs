//! Core card types: suits, ranks, jokers, packs, and the card itself.
//!
//! The shoe holds two identical packs, so a card is a face plus a pack tag.
//! Two cards are *face-equal* when the pack is ignored and *identical* when
//! it is not; pairs and tractors are built from face-equality, hand
//! membership from identity.

use crate::errors::EngineError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    /// Single-letter wire form (S/H/C/D).
    pub fn letter(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Natural ordinal: 2 -> 2 ... A -> 14.
    pub fn ord(self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
        }
    }

    /// Scoring value: kings and tens are worth 10, fives are worth 5.
    pub fn points(self) -> u16 {
        match self {
            Rank::Five => 5,
            Rank::Ten | Rank::King => 10,
            _ => 0,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum JokerKind {
    Small,
    Big,
}

/// Which of the two physical packs a card came from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Pack {
    One,
    Two,
}

impl Pack {
    pub const BOTH: [Pack; 2] = [Pack::One, Pack::Two];

    pub fn number(self) -> u8 {
        match self {
            Pack::One => 1,
            Pack::Two => 2,
        }
    }
}

impl TryFrom<u8> for Pack {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Pack::One),
            2 => Ok(Pack::Two),
            other => Err(EngineError::invalid_deck(format!(
                "pack tag must be 1 or 2, got {other}"
            ))),
        }
    }
}

/// The face of a card, ignoring which pack it came from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Face {
    Standard { suit: Suit, rank: Rank },
    Joker(JokerKind),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Card {
    pub face: Face,
    pub pack: Pack,
}

impl Card {
    pub fn standard(suit: Suit, rank: Rank, pack: Pack) -> Self {
        Self {
            face: Face::Standard { suit, rank },
            pack,
        }
    }

    pub fn joker(kind: JokerKind, pack: Pack) -> Self {
        Self {
            face: Face::Joker(kind),
            pack,
        }
    }

    pub fn is_joker(self) -> bool {
        matches!(self.face, Face::Joker(_))
    }

    pub fn suit(self) -> Option<Suit> {
        match self.face {
            Face::Standard { suit, .. } => Some(suit),
            Face::Joker(_) => None,
        }
    }

    pub fn rank(self) -> Option<Rank> {
        match self.face {
            Face::Standard { rank, .. } => Some(rank),
            Face::Joker(_) => None,
        }
    }

    /// Same face, pack ignored.
    pub fn face_eq(self, other: Card) -> bool {
        self.face == other.face
    }

    /// Scoring value of the card. Jokers carry none.
    pub fn points(self) -> u16 {
        match self.face {
            Face::Standard { rank, .. } => rank.points(),
            Face::Joker(_) => 0,
        }
    }

    /// Rank ordinal inside a plain suit; jokers sit outside suit order.
    pub fn natural_rank(self) -> u8 {
        match self.face {
            Face::Standard { rank, .. } => rank.ord(),
            Face::Joker(_) => 0,
        }
    }
}

/// The suit a card belongs to for following purposes. All trumps (jokers,
/// every 2, and the trump suit) collapse into one effective suit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EffectiveSuit {
    Trump,
    Plain(Suit),
}
