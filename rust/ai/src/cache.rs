//! Single-slot memo for the most recent equity result.

use tablesight_engine::cards::Card;
use tracing::debug;

use crate::equity::EquityResult;
use crate::range::RangeBias;

/// Everything an equity result depends on, apart from the RNG stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub hero: Vec<Card>,
    pub board: Vec<Card>,
    /// Per-opponent bias, quantized to whole percents.
    pub opponents: Vec<(u8, u8)>,
    pub iterations: u32,
}

impl Fingerprint {
    pub fn new(hero: &[Card], board: &[Card], opponents: &[RangeBias], iterations: u32) -> Self {
        Self {
            hero: hero.to_vec(),
            board: board.to_vec(),
            opponents: opponents.iter().map(RangeBias::signature).collect(),
            iterations,
        }
    }
}

/// Holds one `(fingerprint, result)` pair; any different fingerprint replaces it.
#[derive(Debug, Default)]
pub struct EquityCache {
    slot: Option<(Fingerprint, EquityResult)>,
    hits: u64,
    misses: u64,
}

impl EquityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, key: &Fingerprint) -> Option<EquityResult> {
        match &self.slot {
            Some((stored, result)) if stored == key => {
                self.hits += 1;
                debug!(hits = self.hits, board = key.board.len(), "equity cache hit");
                Some(result.clone())
            }
            _ => {
                self.misses += 1;
                debug!(misses = self.misses, board = key.board.len(), "equity cache miss");
                None
            }
        }
    }

    pub fn insert(&mut self, key: Fingerprint, result: EquityResult) {
        self.slot = Some((key, result));
    }

    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablesight_engine::cards::parse_cards;

    fn result(win: u8) -> EquityResult {
        EquityResult {
            win_pct: win,
            split_pct: 0,
            beats_avg: 1,
            lose_to: Vec::new(),
            iterations: 500,
        }
    }

    fn key(hero: &str, board: &str) -> Fingerprint {
        Fingerprint::new(
            &parse_cards(hero).unwrap(),
            &parse_cards(board).unwrap(),
            &[RangeBias::NEUTRAL],
            500,
        )
    }

    #[test]
    fn same_fingerprint_hits() {
        let mut cache = EquityCache::new();
        let k = key("As Kd", "");
        assert_eq!(cache.get(&k), None);
        cache.insert(k.clone(), result(64));
        assert_eq!(cache.get(&k), Some(result(64)));
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
    }

    #[test]
    fn any_change_misses_and_insert_replaces() {
        let mut cache = EquityCache::new();
        cache.insert(key("As Kd", ""), result(64));
        assert!(cache.get(&key("As Kd", "2c 7h 9s")).is_none());

        let mut tighter = key("As Kd", "");
        tighter.opponents = vec![(60, 35)];
        assert!(cache.get(&tighter).is_none());

        cache.insert(key("Qs Qd", ""), result(80));
        assert!(cache.get(&key("As Kd", "")).is_none());
        assert_eq!(cache.get(&key("Qs Qd", "")), Some(result(80)));
    }

    #[test]
    fn invalidate_clears_slot() {
        let mut cache = EquityCache::new();
        cache.insert(key("As Kd", ""), result(64));
        cache.invalidate();
        assert!(cache.is_empty());
        assert!(cache.get(&key("As Kd", "")).is_none());
    }
}
