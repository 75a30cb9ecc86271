//! One-call facade: table snapshot in, presentation-ready advice out.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use tablesight_engine::hand::{current_category, Category};
use tablesight_engine::street::Street;
use tablesight_engine::texture::{board_texture, classify_made_hand, made_hand_label, TextureTag};
use tracing::{debug, warn};

use crate::cache::{EquityCache, Fingerprint};
use crate::config::{self, AdvisorConfig, ConfigError};
use crate::decision::{recommend, DecisionInput, ModeConfig, Recommendation, StackContext};
use crate::equity::{confidence_from_iterations, simulate_equity, EquityResult};
use crate::projection::{project_distribution, DistributionResult};
use crate::range::{bias_from_profile, create_sampler, HandSampler, RangeBias};
use crate::snapshot::TableSnapshot;

/// Everything the presentation layer shows for one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advice {
    pub street: String,
    pub equity: EquityResult,
    /// 0..=100 display indicator derived from the iteration count.
    pub confidence: u8,
    /// Absent on the river.
    pub distribution: Option<DistributionResult>,
    pub texture: Vec<TextureTag>,
    pub made_hand: String,
    pub hero_category: Option<Category>,
    /// Absent when it is not the hero's turn.
    pub recommendation: Option<Recommendation>,
}

pub struct Advisor {
    config: AdvisorConfig,
    mode: ModeConfig,
    sampler: Box<dyn HandSampler>,
    rng: ChaCha20Rng,
    cache: EquityCache,
}

impl std::fmt::Debug for Advisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Advisor")
            .field("config", &self.config)
            .field("sampler", &self.sampler.name())
            .field("cache", &self.cache)
            .finish()
    }
}

impl Advisor {
    pub fn new(config: AdvisorConfig) -> Result<Self, ConfigError> {
        config::validate(&config)?;
        let sampler = create_sampler(&config.sampler)
            .ok_or_else(|| ConfigError::Invalid(format!("unknown sampler {:?}", config.sampler)))?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        debug!(seed, mode = config.mode.name(), sampler = sampler.name(), "advisor ready");
        Ok(Self {
            mode: config.mode.config(),
            rng: ChaCha20Rng::seed_from_u64(seed),
            sampler,
            cache: EquityCache::new(),
            config,
        })
    }

    /// Builds an advisor from the file and environment configuration.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(config::load()?)
    }

    /// Replaces the preset's constants with a tuned set.
    pub fn with_mode_config(mut self, mode: ModeConfig) -> Self {
        self.mode = mode;
        self
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    pub fn mode(&self) -> &ModeConfig {
        &self.mode
    }

    pub fn cache(&self) -> &EquityCache {
        &self.cache
    }

    /// Runs every analysis for one snapshot.
    ///
    /// Returns `None` until the hero holds two cards, and for snapshots whose
    /// cards are inconsistent.
    pub fn advise(&mut self, snapshot: &TableSnapshot) -> Option<Advice> {
        if snapshot.hero_cards.len() != 2 {
            return None;
        }
        if let Err(err) = snapshot.validate() {
            warn!(%err, "skipping inconsistent snapshot");
            return None;
        }

        let hero = &snapshot.hero_cards;
        let board = &snapshot.board;
        let street = Street::from_board_len(board.len());
        let biases: Vec<RangeBias> = snapshot
            .opponents
            .iter()
            .map(|o| bias_from_profile(&o.profile))
            .collect();

        let key = Fingerprint::new(hero, board, &biases, self.config.iterations);
        let equity = match self.cache.get(&key) {
            Some(hit) => hit,
            None => {
                let fresh = simulate_equity(
                    hero,
                    board,
                    &biases,
                    self.config.iterations,
                    self.sampler.as_ref(),
                    &mut self.rng,
                )?;
                self.cache.insert(key, fresh.clone());
                fresh
            }
        };
        let confidence = if biases.is_empty() {
            100
        } else {
            confidence_from_iterations(equity.iterations)
        };

        let distribution = if street.is_river() {
            None
        } else {
            project_distribution(hero, board, self.config.projection_samples, &mut self.rng)
        };

        let texture = board_texture(board);
        let made_hand = classify_made_hand(hero, board);
        let mut known = hero.clone();
        known.extend_from_slice(board);
        let hero_category = current_category(&known);

        let recommendation = snapshot.hero_turn.then(|| {
            let stack = StackContext::new(
                snapshot.hero_stack,
                &snapshot.opponent_stacks(),
                snapshot.pot,
                snapshot.call_amount,
                snapshot.call_unknown,
            );
            let input = DecisionInput {
                street,
                hole: hero,
                win_pct: equity.equity_pct().round() as u8,
                texture: &texture,
                distribution: distribution.as_ref(),
                pot: snapshot.pot,
                big_blind: snapshot.big_blind,
                hero_category,
                made_hand,
                stack,
            };
            recommend(&self.mode, &input)
        });

        Some(Advice {
            street: street.label().to_string(),
            equity,
            confidence,
            distribution,
            texture,
            made_hand: made_hand_label(hero, board),
            hero_category,
            recommendation,
        })
    }
}
