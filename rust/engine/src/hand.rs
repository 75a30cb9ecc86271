use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// The nine standard hand categories, weakest first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::HighCard,
        Category::OnePair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Category> {
        Self::ALL.get(i).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::HighCard => "High card",
            Category::OnePair => "Pair",
            Category::TwoPair => "Two pair",
            Category::ThreeOfAKind => "Three of a kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full house",
            Category::FourOfAKind => "Four of a kind",
            Category::StraightFlush => "Straight flush",
        }
    }
}

/// The best five-card hand found in a set of cards.
///
/// `kickers` holds the tiebreak ranks high to low and is zero-padded past the
/// category's tiebreak length (one rank for straights, two for quads and full
/// houses, three for trips and two pair, four for a pair, five otherwise).
/// Ordering compares the category first and then the kickers lexicographically,
/// which is a strict total order on evaluated hands.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    pub kickers: [u8; 5],
}

impl Ord for HandStrength {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_hands(self, other)
    }
}

impl PartialOrd for HandStrength {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Evaluates the best five-card hand among 5 or more cards.
///
/// Every five-card subset is scored (21 subsets for seven cards) and the
/// maximum is returned. Fewer than five cards yields `None`, the "no hand yet"
/// marker callers use before the flop.
///
/// ```
/// use tablesight_engine::cards::parse_cards;
/// use tablesight_engine::hand::{evaluate_hand, Category};
///
/// let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
/// let strength = evaluate_hand(&cards).unwrap();
/// assert_eq!(strength.category, Category::StraightFlush);
///
/// assert!(evaluate_hand(&cards[..4]).is_none());
/// ```
pub fn evaluate_hand(cards: &[Card]) -> Option<HandStrength> {
    let n = cards.len();
    if n < 5 {
        return None;
    }
    let mut best: Option<HandStrength> = None;
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        let score =
                            score_five(&[cards[a], cards[b], cards[c], cards[d], cards[e]]);
                        if best.is_none_or(|current| score > current) {
                            best = Some(score);
                        }
                    }
                }
            }
        }
    }
    best
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

/// Scores exactly five cards.
pub fn score_five(cards: &[Card; 5]) -> HandStrength {
    let mut rank_counts = [0u8; 15];
    for c in cards {
        rank_counts[c.rank.value() as usize] += 1;
    }
    let flush = cards.iter().all(|c| c.suit == cards[0].suit);

    // (count, rank) pairs, most frequent first, then highest rank first.
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let mut ranked = [0u8; 5];
    for (slot, &(_, r)) in ranked.iter_mut().zip(groups.iter()) {
        *slot = r;
    }

    let straight_high = if groups.len() == 5 {
        detect_straight_high(&ranked)
    } else {
        None
    };

    let category = match (straight_high, flush, groups[0].0, groups.get(1).map(|g| g.0)) {
        (Some(_), true, _, _) => Category::StraightFlush,
        (_, _, 4, _) => Category::FourOfAKind,
        (_, _, 3, Some(2)) => Category::FullHouse,
        (_, true, _, _) => Category::Flush,
        (Some(_), _, _, _) => Category::Straight,
        (_, _, 3, _) => Category::ThreeOfAKind,
        (_, _, 2, Some(2)) => Category::TwoPair,
        (_, _, 2, _) => Category::OnePair,
        _ => Category::HighCard,
    };

    let kickers = match straight_high {
        Some(high) if matches!(category, Category::StraightFlush | Category::Straight) => {
            [high, 0, 0, 0, 0]
        }
        _ => ranked,
    };

    HandStrength { category, kickers }
}

/// Category reached so far by any number of cards.
///
/// Five or more cards are fully evaluated. With one to four cards only rank
/// multiplicities count (pair, two pair, trips, quads, else high card). No
/// cards gives `None`.
pub fn current_category(cards: &[Card]) -> Option<Category> {
    if cards.is_empty() {
        return None;
    }
    if let Some(strength) = evaluate_hand(cards) {
        return Some(strength.category);
    }
    let mut rank_counts = [0u8; 15];
    for c in cards {
        rank_counts[c.rank.value() as usize] += 1;
    }
    let pairs = rank_counts.iter().filter(|&&n| n == 2).count();
    let top = rank_counts.iter().copied().max().unwrap_or(0);
    Some(match (top, pairs) {
        (4, _) => Category::FourOfAKind,
        (3, _) => Category::ThreeOfAKind,
        (_, 2) => Category::TwoPair,
        (2, _) => Category::OnePair,
        _ => Category::HighCard,
    })
}

/// High card of a five-distinct-rank straight, given ranks sorted high to low.
/// The wheel (A-5-4-3-2) counts as five-high.
fn detect_straight_high(desc_ranks: &[u8; 5]) -> Option<u8> {
    if desc_ranks[0] - desc_ranks[4] == 4 {
        return Some(desc_ranks[0]);
    }
    if *desc_ranks == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn eval(text: &str) -> HandStrength {
        evaluate_hand(&parse_cards(text).unwrap()).unwrap()
    }

    #[test]
    fn kickers_follow_group_order() {
        let fh = eval("3c 3d 3h Kc Kd");
        assert_eq!(fh.category, Category::FullHouse);
        assert_eq!(fh.kickers, [3, 13, 0, 0, 0]);

        let two_pair = eval("9c 9d 4h 4c Ad");
        assert_eq!(two_pair.category, Category::TwoPair);
        assert_eq!(two_pair.kickers, [9, 4, 14, 0, 0]);
    }

    #[test]
    fn wheel_is_five_high() {
        let wheel = eval("Ac 2d 3h 4s 5c");
        assert_eq!(wheel.category, Category::Straight);
        assert_eq!(wheel.kickers[0], 5);
        let six_high = eval("2d 3h 4s 5c 6d");
        assert!(six_high > wheel);
    }

    #[test]
    fn seven_cards_pick_best_subset() {
        // Board pairs twice; best two pair uses the top two pairs plus the ace kicker.
        let s = eval("Kc Kd 7h 7s 2c 2d As");
        assert_eq!(s.category, Category::TwoPair);
        assert_eq!(s.kickers, [13, 7, 14, 0, 0]);
    }

    #[test]
    fn current_category_before_five_cards() {
        assert_eq!(current_category(&[]), None);
        assert_eq!(
            current_category(&parse_cards("As Ad").unwrap()),
            Some(Category::OnePair)
        );
        assert_eq!(
            current_category(&parse_cards("As Ad Ks Kd").unwrap()),
            Some(Category::TwoPair)
        );
        assert_eq!(
            current_category(&parse_cards("As Ad Ac 2d").unwrap()),
            Some(Category::ThreeOfAKind)
        );
        assert_eq!(
            current_category(&parse_cards("As Kd").unwrap()),
            Some(Category::HighCard)
        );
    }

    #[test]
    fn category_index_round_trips() {
        for c in Category::ALL {
            assert_eq!(Category::from_index(c.index()), Some(c));
        }
        assert_eq!(Category::from_index(9), None);
    }
}
