//! Trick play: suit-following enforcement and winner resolution.
//!
//! The leader plays any recognized formation; every follower must match its
//! card count and follow the led effective suit as far as their hand allows,
//! degrading through the shape fallbacks (matching tractor, then pairs plus
//! singles, then bare led-suit cards, then a ruff or sluff when void). A play
//! can only win the trick if it classifies as a kind-matching formation
//! wholly in the led suit or wholly in trump.

use super::cards_logic::{card_beats, cards_of_effective_suit, effective_suit, is_trump};
use super::cards_types::{Card, EffectiveSuit, Face, Rank, Suit};
use super::formation::{Formation, FormationKind};
use super::scoring;
use super::state::{MatchState, Phase, Seat};
use crate::errors::EngineError;

/// One seat's contribution to a trick.
#[derive(Debug, Clone, PartialEq)]
pub struct TrickPlay {
    pub seat: Seat,
    pub cards: Vec<Card>,
    /// The formation this play qualifies as (led suit or trump). `None` for
    /// sluffs and shape-broken follows, which can never win.
    pub qualifying: Option<Formation>,
}

/// A trick in progress. `plays[0]` is the leader's formation.
#[derive(Debug, Clone, PartialEq)]
pub struct TrickState {
    pub leader: Seat,
    pub led_kind: FormationKind,
    pub led_suit: EffectiveSuit,
    pub plays: Vec<TrickPlay>,
}

impl TrickState {
    pub fn led_size(&self) -> usize {
        self.plays[0].cards.len()
    }
}

/// A resolved trick, kept for scoring and table display.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedTrick {
    pub leader: Seat,
    pub plays: Vec<TrickPlay>,
    pub winner: Seat,
    pub points: u16,
}

/// Result of a successful play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayProgress {
    TrickOpen,
    TrickClosed {
        trick_no: usize,
        winner: Seat,
        points: u16,
        /// True when this was the final trick and the match is now settled.
        hand_done: bool,
    },
}

/// Play a formation into the current trick.
pub fn play_formation(
    state: &mut MatchState,
    seat: Seat,
    cards: &[Card],
) -> Result<PlayProgress, EngineError> {
    state.require_phase(Phase::Playing)?;
    state.require_turn(seat)?;
    let trump = state.require_trump()?;
    state.check_owns(seat, cards)?;

    let play = if let Some(trick) = &state.current_trick {
        let qualifying = validate_follow(state.hand(seat), cards, trick, trump)?;
        TrickPlay {
            seat,
            cards: cards.to_vec(),
            qualifying,
        }
    } else {
        // Leader: any recognized formation opens the trick.
        let formation = Formation::classify(cards)?;
        state.current_trick = Some(TrickState {
            leader: seat,
            led_kind: formation.kind(),
            led_suit: formation.base_suit(trump),
            plays: Vec::with_capacity(4),
        });
        TrickPlay {
            seat,
            cards: cards.to_vec(),
            qualifying: Some(formation),
        }
    };

    state.take_from_hand(seat, cards)?;
    let trick = state
        .current_trick
        .as_mut()
        .expect("trick was opened above");
    trick.plays.push(play);

    if trick.plays.len() < 4 {
        state.turn = Some(seat.next());
        return Ok(PlayProgress::TrickOpen);
    }

    // Fourth play: resolve, credit, and either open the next trick or settle.
    let trick = state.current_trick.take().expect("trick is present");
    let (winner, points) = resolve_trick(&trick, trump);
    state.tricks.push(ClosedTrick {
        leader: trick.leader,
        plays: trick.plays,
        winner,
        points,
    });
    let trick_no = state.tricks.len();

    // Formations drain hands in lockstep, so all four empty together on the
    // final trick of the hand.
    let hand_done = state.seats.iter().all(|s| s.hand.is_empty());
    if hand_done {
        let declarer = state.require_declarer()?;
        let outcome = scoring::settle(&state.tricks, &state.kitty, declarer, state.contract);
        state.outcome = Some(outcome);
        state.phase = Phase::Ended;
        state.turn = None;
    } else {
        state.turn = Some(winner);
    }

    Ok(PlayProgress::TrickClosed {
        trick_no,
        winner,
        points,
        hand_done,
    })
}

/// Apply the suit-following rules to a follower's play. Returns the
/// qualifying formation if the play can contend for the trick.
fn validate_follow(
    hand: &[Card],
    cards: &[Card],
    trick: &TrickState,
    trump: Suit,
) -> Result<Option<Formation>, EngineError> {
    let led_size = trick.led_size();
    if cards.len() != led_size {
        return Err(EngineError::WrongFormationSize {
            expected: led_size,
            got: cards.len(),
        });
    }

    let hand_of_led = cards_of_effective_suit(hand, trick.led_suit, trump);

    if hand_of_led.len() >= led_size {
        // Enough led-suit cards: the whole play must stay in the led suit.
        if cards
            .iter()
            .any(|&c| effective_suit(c, trump) != trick.led_suit)
        {
            return Err(EngineError::follow_violation(
                "holding enough led-suit cards, the play must use only them",
            ));
        }
        return match trick.led_kind {
            FormationKind::Single => Ok(Some(Formation::Single(cards[0]))),
            FormationKind::Pair => {
                if cards[0].face_eq(cards[1]) {
                    Ok(Some(Formation::Pair([cards[0], cards[1]])))
                } else if has_pair(&hand_of_led) {
                    Err(EngineError::follow_violation(
                        "a pair of the led suit is held and must be played",
                    ))
                } else {
                    // No pair available: any two led-suit cards, out of contention.
                    Ok(None)
                }
            }
            FormationKind::Tractor => {
                let want_pairs = led_size / 2;
                if let Ok(formation) = Formation::classify(cards) {
                    if formation.kind() == FormationKind::Tractor {
                        return Ok(Some(formation));
                    }
                }
                if has_tractor(&hand_of_led, want_pairs) {
                    return Err(EngineError::follow_violation(
                        "a matching tractor of the led suit is held and must be played",
                    ));
                }
                let available = pair_count(&hand_of_led);
                let required = available.min(want_pairs);
                if pair_count(cards) < required {
                    return Err(EngineError::follow_violation(format!(
                        "at least {required} led-suit pair(s) must be included"
                    )));
                }
                Ok(None)
            }
        };
    }

    if !hand_of_led.is_empty() {
        // Short in the led suit: every led-suit card goes in, the rest sluff.
        let mut remaining = cards.to_vec();
        for held in &hand_of_led {
            match remaining.iter().position(|c| c == held) {
                Some(pos) => {
                    remaining.swap_remove(pos);
                }
                None => {
                    return Err(EngineError::follow_violation(
                        "every held card of the led suit must be played",
                    ))
                }
            }
        }
        return Ok(None);
    }

    // Void in the led suit: a kind-matching trump formation is a ruff and
    // contends; anything else (including mixed trump) is a sluff.
    if cards.iter().all(|&c| is_trump(c, trump)) {
        if let Ok(formation) = Formation::classify(cards) {
            if formation.kind() == trick.led_kind {
                return Ok(Some(formation));
            }
        }
    }
    Ok(None)
}

/// Winner and captured points of a complete trick. Scans in play order and
/// replaces the incumbent only on a strict beat, so earlier plays keep ties.
fn resolve_trick(trick: &TrickState, trump: Suit) -> (Seat, u16) {
    debug_assert_eq!(trick.plays.len(), 4);

    let mut best = 0usize;
    for i in 1..trick.plays.len() {
        let Some(challenger) = &trick.plays[i].qualifying else {
            continue;
        };
        let incumbent = trick.plays[best]
            .qualifying
            .as_ref()
            .expect("the incumbent always qualifies");
        let challenger_trump = challenger.base_suit(trump) == EffectiveSuit::Trump;
        let incumbent_trump = incumbent.base_suit(trump) == EffectiveSuit::Trump;
        let beats = if challenger_trump != incumbent_trump {
            challenger_trump
        } else {
            card_beats(
                challenger.highest_card(trump),
                incumbent.highest_card(trump),
                trick.led_suit,
                trump,
            )
        };
        if beats {
            best = i;
        }
    }

    let points = trick
        .plays
        .iter()
        .flat_map(|p| p.cards.iter())
        .map(|c| c.points())
        .sum();
    (trick.plays[best].seat, points)
}

fn has_pair(cards: &[Card]) -> bool {
    cards
        .iter()
        .enumerate()
        .any(|(i, &a)| cards[i + 1..].iter().any(|&b| a.face_eq(b)))
}

/// Number of face-equal pairs formable from `cards`.
fn pair_count(cards: &[Card]) -> usize {
    let mut tally: Vec<(Face, usize)> = Vec::new();
    for card in cards {
        match tally.iter_mut().find(|(face, _)| *face == card.face) {
            Some((_, n)) => *n += 1,
            None => tally.push((card.face, 1)),
        }
    }
    tally.iter().map(|(_, n)| n / 2).sum()
}

/// Whether `cards` (already filtered to one effective suit) contain `k`
/// consecutive-rank pairs. 2s and jokers never take part.
fn has_tractor(cards: &[Card], k: usize) -> bool {
    let mut pair_ranks: Vec<u8> = Vec::new();
    let mut seen: Vec<(Face, usize)> = Vec::new();
    for card in cards {
        if let Face::Standard { rank, .. } = card.face {
            if rank == Rank::Two {
                continue;
            }
            match seen.iter_mut().find(|(face, _)| *face == card.face) {
                Some((_, n)) => {
                    *n += 1;
                    if *n == 2 {
                        pair_ranks.push(card.natural_rank());
                    }
                }
                None => seen.push((card.face, 1)),
            }
        }
    }
    if pair_ranks.len() < k {
        return false;
    }
    pair_ranks.sort_unstable();
    let mut run = 1usize;
    for w in pair_ranks.windows(2) {
        if w[1] == w[0] + 1 {
            run += 1;
            if run >= k {
                return true;
            }
        } else {
            run = 1;
        }
    }
    run >= k
}
