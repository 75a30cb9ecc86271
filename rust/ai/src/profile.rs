//! Per-opponent action history and the store seam that persists it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An action observed from an opponent, as reported by the table observer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum ObservedAction {
    Bet,
    Raise,
    Call,
    Check,
    Fold,
}

/// Running counters for one opponent.
///
/// Profiles live across many hands. The range model only reads them; the
/// profile store and action ingestion own all mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpponentProfile {
    pub bets: u32,
    pub raises: u32,
    pub calls: u32,
    pub checks: u32,
    pub folds: u32,
    pub sample_count: u32,
    /// 0..=100
    pub aggression_score: u8,
    /// 0..=100, written by the store from shown-down bluffs.
    pub bluff_score: u8,
}

impl OpponentProfile {
    /// Counts one observed action and refreshes the aggression score.
    ///
    /// ```
    /// use tablesight_ai::profile::{ObservedAction, OpponentProfile};
    ///
    /// let mut p = OpponentProfile::default();
    /// p.record(ObservedAction::Raise);
    /// p.record(ObservedAction::Call);
    /// assert_eq!(p.sample_count, 2);
    /// assert_eq!(p.aggression_score, 50);
    /// ```
    pub fn record(&mut self, action: ObservedAction) {
        match action {
            ObservedAction::Bet => self.bets += 1,
            ObservedAction::Raise => self.raises += 1,
            ObservedAction::Call => self.calls += 1,
            ObservedAction::Check => self.checks += 1,
            ObservedAction::Fold => self.folds += 1,
        }
        self.sample_count += 1;

        let aggressive = self.bets + self.raises;
        let voluntary = aggressive + self.calls + self.checks;
        if voluntary > 0 {
            self.aggression_score =
                (100.0 * aggressive as f64 / voluntary as f64).round() as u8;
        }
    }

    pub fn fold_rate(&self) -> f64 {
        if self.sample_count == 0 {
            return 0.0;
        }
        (self.folds as f64 / self.sample_count as f64).min(1.0)
    }
}

/// Persistence seam for opponent profiles.
///
/// Unknown players load as an empty profile, which the range model treats as
/// neutral until enough samples accumulate.
pub trait ProfileStore {
    fn load_profile(&self, player_id: &str) -> OpponentProfile;

    fn save_profile(&mut self, player_id: &str, profile: &OpponentProfile);
}

/// In-memory [`ProfileStore`] for hosts without persistence and for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryProfileStore {
    profiles: HashMap<String, OpponentProfile>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load_profile(&self, player_id: &str) -> OpponentProfile {
        self.profiles.get(player_id).cloned().unwrap_or_default()
    }

    fn save_profile(&mut self, player_id: &str, profile: &OpponentProfile) {
        self.profiles.insert(player_id.to_string(), profile.clone());
    }
}
