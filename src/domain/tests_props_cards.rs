//! Property tests over the card model: hierarchy shape, comparison laws,
//! formation classification, and deal conservation.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::cards_logic::{card_beats, effective_suit, is_trump, trump_rank};
use super::cards_types::{Card, EffectiveSuit, Face, JokerKind, Pack, Rank, Suit};
use super::deck::{deal, Deck, SHOE_POINTS};
use super::formation::Formation;
use crate::config::MatchRules;

fn arb_card() -> impl Strategy<Value = Card> {
    (0usize..54, any::<bool>()).prop_map(|(i, second)| {
        let pack = if second { Pack::Two } else { Pack::One };
        match i {
            52 => Card::joker(JokerKind::Big, pack),
            53 => Card::joker(JokerKind::Small, pack),
            _ => Card::standard(Suit::ALL[i / 13], Rank::ALL[i % 13], pack),
        }
    })
}

fn arb_suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::ALL.to_vec())
}

fn is_off_suit_two(card: Card, trump: Suit) -> bool {
    matches!(card.face, Face::Standard { suit, rank: Rank::Two } if suit != trump)
}

proptest! {
    /// Every trump rank lands in the documented bands, and `is_trump`
    /// agrees with a positive rank.
    #[test]
    fn hierarchy_bands(card in arb_card(), trump in arb_suit()) {
        let rank = trump_rank(card, trump);
        let banded = rank == 0
            || (903..=914).contains(&rank)
            || (997..=1000).contains(&rank);
        prop_assert!(banded, "unexpected hierarchy value {rank}");
        prop_assert_eq!(is_trump(card, trump), rank > 0);
        prop_assert_eq!(
            effective_suit(card, trump) == EffectiveSuit::Trump,
            rank > 0
        );
    }

    /// No pair of cards ever beats each other both ways.
    #[test]
    fn beats_is_antisymmetric(
        a in arb_card(),
        b in arb_card(),
        trump in arb_suit(),
        led in arb_suit(),
    ) {
        let led = EffectiveSuit::Plain(led);
        prop_assert!(!(card_beats(a, b, led, trump) && card_beats(b, a, led, trump)));
    }

    /// Face-equal duplicates never beat each other: play order decides.
    #[test]
    fn face_equal_is_always_a_tie(
        card in arb_card(),
        trump in arb_suit(),
        led in arb_suit(),
    ) {
        let twin = Card { pack: if card.pack == Pack::One { Pack::Two } else { Pack::One }, ..card };
        let led = EffectiveSuit::Plain(led);
        prop_assert!(!card_beats(card, twin, led, trump));
        prop_assert!(!card_beats(twin, card, led, trump));
    }

    /// Inside the contested set (trump plus led suit), face-distinct cards
    /// are totally ordered, except off-suit 2s, which share one slot.
    #[test]
    fn contested_cards_are_totally_ordered(
        a in arb_card(),
        b in arb_card(),
        trump in arb_suit(),
        led_plain in arb_suit(),
    ) {
        let led = EffectiveSuit::Plain(led_plain);
        let contested = |c: Card| {
            let eff = effective_suit(c, trump);
            eff == EffectiveSuit::Trump || eff == led
        };
        prop_assume!(contested(a) && contested(b));
        prop_assume!(!a.face_eq(b));
        prop_assume!(!(is_off_suit_two(a, trump) && is_off_suit_two(b, trump)));

        let forward = card_beats(a, b, led, trump);
        let backward = card_beats(b, a, led, trump);
        prop_assert!(forward ^ backward, "{a} vs {b} must order one way");
    }

    /// Beats is transitive under a fixed context.
    #[test]
    fn beats_is_transitive(
        a in arb_card(),
        b in arb_card(),
        c in arb_card(),
        trump in arb_suit(),
        led in arb_suit(),
    ) {
        let led = EffectiveSuit::Plain(led);
        if card_beats(a, b, led, trump) && card_beats(b, c, led, trump) {
            prop_assert!(card_beats(a, c, led, trump));
        }
    }

    /// Classification never panics and does not depend on input order.
    #[test]
    fn classify_is_order_insensitive(
        mut cards in prop::collection::vec(arb_card(), 1..=8),
        rotate in 0usize..8,
    ) {
        let first = Formation::classify(&cards);
        let len = cards.len().max(1);
        cards.rotate_left(rotate % len);
        let second = Formation::classify(&cards);
        prop_assert_eq!(first.is_ok(), second.is_ok());
        if let (Ok(f), Ok(g)) = (first, second) {
            prop_assert_eq!(f.kind(), g.kind());
            prop_assert_eq!(f.points(), g.points());
        }
    }

    /// Any seed yields a deal that conserves the shoe exactly.
    #[test]
    fn deal_conserves_the_shoe(seed in any::<u64>()) {
        let mut deck = Deck::standard_shoe();
        deck.shuffle(&mut StdRng::seed_from_u64(seed));
        let dealt = deal(&deck, &MatchRules::default()).unwrap();

        let mut all: Vec<Card> = dealt.hands.iter().flatten().copied().collect();
        all.extend(dealt.kitty.iter().copied());
        prop_assert_eq!(all.len(), 108);
        prop_assert_eq!(all.iter().map(|c| c.points()).sum::<u16>(), SHOE_POINTS);

        all.sort();
        let mut expected = Deck::standard_shoe().cards().to_vec();
        expected.sort();
        prop_assert_eq!(all, expected);
    }

    /// Wire tokens round-trip for every card.
    #[test]
    fn wire_tokens_round_trip(card in arb_card()) {
        let token = card.to_string();
        prop_assert_eq!(token.parse::<Card>().unwrap(), card);
    }
}
