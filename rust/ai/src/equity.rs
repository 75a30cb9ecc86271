//! Monte Carlo equity against one or more biased opponent ranges.

use std::cmp::Ordering;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tablesight_engine::cards::Card;
use tablesight_engine::deck::Deck;
use tablesight_engine::hand::{evaluate_hand, Category, HandStrength};
use tracing::debug;

use crate::range::{HandSampler, RangeBias};

/// A hand category with the rounded percent of trials it accounted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: Category,
    pub pct: u8,
}

/// Summary of a simulation run. All percentages are whole numbers in 0..=100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityResult {
    pub win_pct: u8,
    pub split_pct: u8,
    /// Opponents beaten per trial, on average (rounded).
    pub beats_avg: u32,
    /// Up to three categories that beat the hero, most frequent first.
    pub lose_to: Vec<CategoryShare>,
    pub iterations: u32,
}

impl EquityResult {
    fn uncontested(iterations: u32) -> Self {
        Self {
            win_pct: 100,
            split_pct: 0,
            beats_avg: 0,
            lose_to: Vec::new(),
            iterations,
        }
    }

    /// Win plus half of the split share.
    pub fn equity_pct(&self) -> f64 {
        self.win_pct as f64 + self.split_pct as f64 / 2.0
    }
}

/// Saturating confidence indicator for a run of `iterations` trials.
///
/// Presentation only; it is not a statistical interval.
///
/// ```
/// use tablesight_ai::equity::confidence_from_iterations;
///
/// assert_eq!(confidence_from_iterations(0), 0);
/// assert_eq!(confidence_from_iterations(700), 63);
/// assert_eq!(confidence_from_iterations(10_000), 100);
/// ```
pub fn confidence_from_iterations(iterations: u32) -> u8 {
    (100.0 * (1.0 - (-(iterations as f64) / 700.0).exp())).round() as u8
}

fn pct(count: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    (100.0 * count as f64 / total as f64).round() as u8
}

fn seven(hole: [Card; 2], board: &[Card]) -> Option<HandStrength> {
    let mut cards = [hole[0]; 7];
    cards[1] = hole[1];
    cards[2..2 + board.len()].copy_from_slice(board);
    evaluate_hand(&cards[..2 + board.len()])
}

/// Estimates the hero's showdown chances by simulation.
///
/// Each trial completes the board uniformly from the unseen cards, deals every
/// opponent two cards through `sampler` from the same shrinking deck, and
/// compares the hero to the best opponent hand. With no opponents the hero
/// wins outright and no trials are run.
///
/// Returns `None` when the hero does not hold exactly two cards, the board has
/// more than five, there are not enough unseen cards for everyone, or
/// `iterations` is zero with opponents present.
pub fn simulate_equity<R: Rng>(
    hero: &[Card],
    board: &[Card],
    opponents: &[RangeBias],
    iterations: u32,
    sampler: &dyn HandSampler,
    rng: &mut R,
) -> Option<EquityResult> {
    let &[h0, h1] = hero else {
        return None;
    };
    if board.len() > 5 {
        return None;
    }
    if opponents.is_empty() {
        return Some(EquityResult::uncontested(iterations));
    }
    if iterations == 0 {
        return None;
    }

    let mut known = vec![h0, h1];
    known.extend_from_slice(board);
    let base_deck = Deck::without(&known);
    if base_deck.len() < (5 - board.len()) + 2 * opponents.len() {
        return None;
    }

    let mut wins = 0u32;
    let mut ties = 0u32;
    let mut beaten = 0u64;
    let mut lost_to = [0u32; 9];
    let mut full_board = Vec::with_capacity(5);
    let mut opponent_hands: Vec<HandStrength> = Vec::with_capacity(opponents.len());

    for _ in 0..iterations {
        let mut deck = base_deck.clone();
        full_board.clear();
        full_board.extend_from_slice(board);
        deck.fill_to(&mut full_board, 5, rng);

        opponent_hands.clear();
        for bias in opponents {
            let hole = sampler.draw_hand(&mut deck, bias, &mut *rng)?;
            opponent_hands.push(seven(hole, &full_board)?);
        }

        let mine = seven([h0, h1], &full_board)?;
        beaten += opponent_hands.iter().filter(|o| mine > **o).count() as u64;
        let best = opponent_hands.iter().max()?;
        match mine.cmp(best) {
            Ordering::Greater => wins += 1,
            Ordering::Equal => ties += 1,
            Ordering::Less => lost_to[best.category.index()] += 1,
        }
    }

    let mut lose_to: Vec<(Category, u32)> = Category::ALL
        .iter()
        .map(|&c| (c, lost_to[c.index()]))
        .filter(|&(_, n)| n > 0)
        .collect();
    lose_to.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
    lose_to.truncate(3);

    let result = EquityResult {
        win_pct: pct(wins, iterations),
        split_pct: pct(ties, iterations),
        beats_avg: (beaten as f64 / iterations as f64).round() as u32,
        lose_to: lose_to
            .into_iter()
            .map(|(category, n)| CategoryShare {
                category,
                pct: pct(n, iterations),
            })
            .collect(),
        iterations,
    };
    debug!(
        iterations,
        opponents = opponents.len(),
        board = board.len(),
        win_pct = result.win_pct,
        split_pct = result.split_pct,
        sampler = sampler.name(),
        "equity simulation finished"
    );
    Some(result)
}
