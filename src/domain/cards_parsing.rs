//! Wire tokens for cards: `"KH#2"`, `"10S#1"`, `"BJ#1"`, `"SJ#2"`.
//!
//! The pack tag is part of the token because the shoe holds two of every
//! face and hand membership is checked on identity.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use super::cards_types::{Card, Face, JokerKind, Pack, Rank, Suit};
use crate::errors::EngineError;

fn parse_error(token: &str) -> EngineError {
    EngineError::invalid_formation(format!("unparseable card token: {token:?}"))
}

impl FromStr for Card {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (face_part, pack_part) = s.split_once('#').ok_or_else(|| parse_error(s))?;
        let pack = match pack_part {
            "1" => Pack::One,
            "2" => Pack::Two,
            _ => return Err(parse_error(s)),
        };

        match face_part {
            "BJ" => return Ok(Card::joker(JokerKind::Big, pack)),
            "SJ" => return Ok(Card::joker(JokerKind::Small, pack)),
            _ => {}
        }

        if face_part.len() < 2 || !face_part.is_ascii() {
            return Err(parse_error(s));
        }
        let (rank_part, suit_part) = face_part.split_at(face_part.len() - 1);
        let suit = match suit_part {
            "S" => Suit::Spades,
            "H" => Suit::Hearts,
            "C" => Suit::Clubs,
            "D" => Suit::Diamonds,
            _ => return Err(parse_error(s)),
        };
        let rank = match rank_part {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(parse_error(s)),
        };
        Ok(Card::standard(suit, rank, pack))
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.face {
            Face::Joker(JokerKind::Big) => write!(f, "BJ#{}", self.pack.number()),
            Face::Joker(JokerKind::Small) => write!(f, "SJ#{}", self.pack.number()),
            Face::Standard { suit, rank } => {
                let rank_token = match rank {
                    Rank::Two => "2",
                    Rank::Three => "3",
                    Rank::Four => "4",
                    Rank::Five => "5",
                    Rank::Six => "6",
                    Rank::Seven => "7",
                    Rank::Eight => "8",
                    Rank::Nine => "9",
                    Rank::Ten => "10",
                    Rank::Jack => "J",
                    Rank::Queen => "Q",
                    Rank::King => "K",
                    Rank::Ace => "A",
                };
                write!(f, "{rank_token}{}#{}", suit.letter(), self.pack.number())
            }
        }
    }
}

/// Parse a batch of tokens, failing on the first bad one.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, EngineError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}
