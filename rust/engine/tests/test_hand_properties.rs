/// Property-based tests for hand evaluation using proptest
///
/// Seven-card evaluation must not depend on card order, and the comparator
/// must behave as a strict total order.
use proptest::prelude::*;
use std::cmp::Ordering;
use tablesight_engine::cards::{full_deck, Card};
use tablesight_engine::hand::{compare_hands, evaluate_hand, HandStrength};

// Strategy to pick `n` distinct cards from the deck
fn unique_cards_strategy(n: usize) -> impl Strategy<Value = Vec<Card>> {
    Just(full_deck()).prop_shuffle().prop_map(move |deck| deck[..n].to_vec())
}

fn eval(cards: &[Card]) -> HandStrength {
    evaluate_hand(cards).expect("five or more cards")
}

proptest! {
    #[test]
    fn category_is_always_in_range(cards in unique_cards_strategy(7)) {
        let hs = eval(&cards);
        prop_assert!(hs.category.index() <= 8);
    }

    #[test]
    fn evaluation_is_permutation_invariant(
        cards in unique_cards_strategy(7),
        perm in Just((0..7usize).collect::<Vec<_>>()).prop_shuffle()
    ) {
        let shuffled: Vec<Card> = perm.iter().map(|&i| cards[i]).collect();
        prop_assert_eq!(eval(&cards), eval(&shuffled));
    }

    #[test]
    fn comparator_is_antisymmetric(a in unique_cards_strategy(7), b in unique_cards_strategy(7)) {
        let (ha, hb) = (eval(&a), eval(&b));
        prop_assert_eq!(compare_hands(&ha, &hb), compare_hands(&hb, &ha).reverse());
        prop_assert_eq!(compare_hands(&ha, &hb) == Ordering::Equal, ha == hb);
    }

    #[test]
    fn comparator_is_transitive(
        a in unique_cards_strategy(7),
        b in unique_cards_strategy(7),
        c in unique_cards_strategy(7)
    ) {
        let mut hands = [eval(&a), eval(&b), eval(&c)];
        hands.sort_by(compare_hands);
        prop_assert!(compare_hands(&hands[0], &hands[1]).is_le());
        prop_assert!(compare_hands(&hands[1], &hands[2]).is_le());
        prop_assert!(compare_hands(&hands[0], &hands[2]).is_le());
    }

    #[test]
    fn adding_cards_never_weakens_the_hand(cards in unique_cards_strategy(7)) {
        let five = eval(&cards[..5]);
        let six = eval(&cards[..6]);
        let seven = eval(&cards);
        prop_assert!(six >= five);
        prop_assert!(seven >= six);
    }
}
