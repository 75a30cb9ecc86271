//! Distribution of the hero's final hand category over the remaining board.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tablesight_engine::cards::Card;
use tablesight_engine::deck::Deck;
use tablesight_engine::hand::{current_category, evaluate_hand, Category};

use crate::equity::CategoryShare;

/// Default number of random runouts when enumeration would be too large.
pub const DEFAULT_PROJECTION_SAMPLES: u32 = 800;

/// Percent of runouts finishing at or above a threshold category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReachPct {
    pub straight_or_better: u8,
    pub flush_or_better: u8,
    pub full_house_or_better: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionResult {
    /// Up to three most frequent final categories, most frequent first.
    pub top: Vec<CategoryShare>,
    pub reach_pct: ReachPct,
    /// Percent of runouts ending in a better category than the hero holds now.
    pub improve_pct: u8,
    /// Whether every runout was enumerated rather than sampled.
    pub exhaustive: bool,
    pub samples: u32,
}

/// Raw per-category counts of final hands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryHistogram {
    counts: [u32; 9],
    total: u32,
}

impl CategoryHistogram {
    pub fn add(&mut self, category: Category) {
        self.counts[category.index()] += 1;
        self.total += 1;
    }

    pub fn count(&self, category: Category) -> u32 {
        self.counts[category.index()]
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Runouts finishing at `category` or better.
    pub fn at_least(&self, category: Category) -> u32 {
        self.counts[category.index()..].iter().sum()
    }

    pub fn pct(&self, count: u32) -> u8 {
        if self.total == 0 {
            return 0;
        }
        (100.0 * count as f64 / self.total as f64).round() as u8
    }
}

/// Projects where the hero's hand ends up by the river.
///
/// With one or two board cards to come, every combination of unseen cards is
/// enumerated (46 or 1,081 runouts on the turn or flop), so the result is exact
/// and deterministic. Earlier streets draw `samples` random runouts.
///
/// Returns `None` when the hero does not hold two cards, or the board is
/// already complete.
pub fn project_distribution<R: Rng>(
    hero: &[Card],
    board: &[Card],
    samples: u32,
    rng: &mut R,
) -> Option<DistributionResult> {
    let &[h0, h1] = hero else {
        return None;
    };
    if board.len() >= 5 {
        return None;
    }
    let mut known = vec![h0, h1];
    known.extend_from_slice(board);
    let held = current_category(&known)?;
    let deck = Deck::without(&known);
    let missing = 5 - board.len();

    let mut histogram = CategoryHistogram::default();
    let mut improved = 0u32;
    let mut tally = |cards: &[Card], histogram: &mut CategoryHistogram| {
        if let Some(strength) = evaluate_hand(cards) {
            histogram.add(strength.category);
            if strength.category > held {
                improved += 1;
            }
        }
    };

    let exhaustive = missing <= 2;
    let mut hand = known.clone();
    if exhaustive {
        let unseen = deck.cards();
        for (i, &a) in unseen.iter().enumerate() {
            if missing == 1 {
                hand.push(a);
                tally(&hand, &mut histogram);
                hand.pop();
                continue;
            }
            for &b in &unseen[i + 1..] {
                hand.push(a);
                hand.push(b);
                tally(&hand, &mut histogram);
                hand.truncate(known.len());
            }
        }
    } else {
        for _ in 0..samples {
            let mut runout = deck.clone();
            hand.truncate(known.len());
            runout.fill_to(&mut hand, 7, rng);
            tally(&hand, &mut histogram);
        }
    }

    if histogram.total() == 0 {
        return None;
    }

    let mut ranked: Vec<(Category, u32)> = Category::ALL
        .iter()
        .map(|&c| (c, histogram.count(c)))
        .filter(|&(_, n)| n > 0)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
    ranked.truncate(3);

    Some(DistributionResult {
        top: ranked
            .into_iter()
            .map(|(category, n)| CategoryShare {
                category,
                pct: histogram.pct(n),
            })
            .collect(),
        reach_pct: ReachPct {
            straight_or_better: histogram.pct(histogram.at_least(Category::Straight)),
            flush_or_better: histogram.pct(histogram.at_least(Category::Flush)),
            full_house_or_better: histogram.pct(histogram.at_least(Category::FullHouse)),
        },
        improve_pct: histogram.pct(improved),
        exhaustive,
        samples: histogram.total(),
    })
}
