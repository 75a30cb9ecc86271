//! Opponent range model.
//!
//! An opponent's history is reduced to a [`RangeBias`] (tightness and
//! aggression), and hole cards for that opponent are drawn with a preference
//! for the hands such a player actually takes to a showdown. Each heuristic
//! is its own pure function so it can be tuned without touching the sampler.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tablesight_engine::cards::Card;
use tablesight_engine::deck::Deck;
use tracing::trace;

use crate::profile::OpponentProfile;

/// Profiles with fewer samples than this are treated as unknown.
pub const MIN_PROFILE_SAMPLES: u32 = 6;

/// Attempts the rejection sampler makes before falling back to a uniform draw.
pub const MAX_SAMPLE_ATTEMPTS: usize = 16;

/// Two scalar summaries of an opponent's range, each in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeBias {
    pub tightness: f64,
    pub aggression: f64,
}

impl RangeBias {
    pub const NEUTRAL: RangeBias = RangeBias {
        tightness: 0.35,
        aggression: 0.35,
    };

    /// Whole-percent form, stable enough to key caches on.
    pub fn signature(&self) -> (u8, u8) {
        (
            (self.tightness * 100.0).round() as u8,
            (self.aggression * 100.0).round() as u8,
        )
    }
}

impl Default for RangeBias {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Derives the range bias from an opponent's counters.
///
/// ```
/// use tablesight_ai::profile::OpponentProfile;
/// use tablesight_ai::range::{bias_from_profile, RangeBias};
///
/// // Too few samples: neutral.
/// let p = OpponentProfile { folds: 2, sample_count: 3, ..Default::default() };
/// assert_eq!(bias_from_profile(&p), RangeBias::NEUTRAL);
/// ```
pub fn bias_from_profile(profile: &OpponentProfile) -> RangeBias {
    if profile.sample_count < MIN_PROFILE_SAMPLES {
        return RangeBias::NEUTRAL;
    }
    let fold_rate = profile.fold_rate();
    let aggression_norm = clamp01(profile.aggression_score as f64 / 100.0);
    let bluff_norm = clamp01(profile.bluff_score as f64 / 100.0);
    RangeBias {
        tightness: clamp01(0.25 + 0.75 * fold_rate - 0.2 * aggression_norm),
        aggression: clamp01(0.7 * aggression_norm + 0.3 * bluff_norm),
    }
}

/// Closed-form starting-hand strength in `0.0..=1.0`.
///
/// High card carries most of the weight, then the low card; pairs, suitedness
/// and connectedness add bonuses, wide gaps a penalty.
pub fn hole_strength(a: Card, b: Card) -> f64 {
    let (r1, r2) = (a.rank.value(), b.rank.value());
    let (high, low) = if r1 >= r2 { (r1, r2) } else { (r2, r1) };
    let hi = (high - 2) as f64 / 12.0;
    let lo = (low - 2) as f64 / 12.0;

    let mut strength = 0.5 * hi + 0.25 * lo;
    if high == low {
        strength += 0.25 + 0.1 * hi;
    } else {
        strength += match high - low {
            1 => 0.05,
            2 => 0.03,
            3 => 0.01,
            4 => 0.0,
            _ => -0.05,
        };
    }
    if a.suit == b.suit {
        strength += 0.06;
    }
    clamp01(strength)
}

/// Probability that an opponent with `bias` continues with a hand of `strength`.
///
/// Tight players raise the exponent and so cut weak hands harder; aggressive
/// players loosen the effective tightness and take some extra weak hands along.
/// Always within `[0.03, 0.98]`.
pub fn acceptance_weight(strength: f64, bias: &RangeBias) -> f64 {
    let base = 0.2 + 0.8 * clamp01(strength);
    let effective_tightness = clamp01(bias.tightness - 0.2 * bias.aggression);
    let mut weight = base.powf(1.0 + 2.0 * effective_tightness);
    if bias.aggression > 0.55 && strength < 0.5 {
        weight += 0.15 * (bias.aggression - 0.55);
    }
    weight.clamp(0.03, 0.98)
}

/// Draws an opponent's two hole cards from the shared remaining deck.
///
/// Implementations must remove the returned cards from `deck` and return
/// `None` only when fewer than two cards remain.
pub trait HandSampler: Send + Sync {
    fn draw_hand(
        &self,
        deck: &mut Deck,
        bias: &RangeBias,
        rng: &mut dyn RngCore,
    ) -> Option<[Card; 2]>;

    fn name(&self) -> &str;
}

/// Rejection sampler over random two-card picks, weighted by
/// [`acceptance_weight`]. After [`MAX_SAMPLE_ATTEMPTS`] rejections it draws
/// uniformly, so it always terminates.
#[derive(Debug, Default)]
pub struct RejectionSampler {
    fallbacks: AtomicU64,
}

impl RejectionSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many draws ended in the uniform fallback.
    pub fn fallbacks(&self) -> u64 {
        self.fallbacks.load(Ordering::Relaxed)
    }
}

impl HandSampler for RejectionSampler {
    fn draw_hand(
        &self,
        deck: &mut Deck,
        bias: &RangeBias,
        rng: &mut dyn RngCore,
    ) -> Option<[Card; 2]> {
        let n = deck.len();
        if n < 2 {
            return None;
        }
        for _ in 0..MAX_SAMPLE_ATTEMPTS {
            let i = rng.random_range(0..n);
            let mut j = rng.random_range(0..n - 1);
            if j >= i {
                j += 1;
            }
            let (a, b) = (deck.cards()[i], deck.cards()[j]);
            let weight = acceptance_weight(hole_strength(a, b), bias);
            if rng.random::<f64>() < weight {
                deck.remove(a);
                deck.remove(b);
                return Some([a, b]);
            }
        }
        let total = self.fallbacks.fetch_add(1, Ordering::Relaxed) + 1;
        trace!(
            fallbacks = total,
            remaining = n,
            "weighted draw exhausted attempts, drawing uniformly"
        );
        deck.draw_pair(rng)
    }

    fn name(&self) -> &str {
        "rejection"
    }
}

/// Ignores the bias entirely: every remaining pair is equally likely.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformSampler;

impl HandSampler for UniformSampler {
    fn draw_hand(
        &self,
        deck: &mut Deck,
        _bias: &RangeBias,
        rng: &mut dyn RngCore,
    ) -> Option<[Card; 2]> {
        deck.draw_pair(rng)
    }

    fn name(&self) -> &str {
        "uniform"
    }
}

/// Builds a sampler by name (`"rejection"` or `"uniform"`).
///
/// ```
/// use tablesight_ai::range::create_sampler;
///
/// let sampler = create_sampler("rejection").unwrap();
/// assert_eq!(sampler.name(), "rejection");
/// assert!(create_sampler("exact").is_none());
/// ```
pub fn create_sampler(kind: &str) -> Option<Box<dyn HandSampler>> {
    match kind {
        "rejection" => Some(Box::new(RejectionSampler::new())),
        "uniform" => Some(Box::new(UniformSampler)),
        _ => None,
    }
}
