//! Per-tick table state handed over by the table observer.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tablesight_engine::cards::Card;
use thiserror::Error;

use crate::profile::{OpponentProfile, ProfileStore};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeatedOpponent {
    pub id: String,
    pub stack: u32,
    #[serde(default)]
    pub profile: OpponentProfile,
}

/// One observation of the table. Cards are already typed; no text scraping
/// happens past this point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSnapshot {
    pub hero_cards: Vec<Card>,
    pub board: Vec<Card>,
    pub pot: u32,
    pub call_amount: u32,
    /// The observer saw a call button but could not read its amount.
    pub call_unknown: bool,
    pub hero_stack: u32,
    pub opponents: Vec<SeatedOpponent>,
    pub small_blind: u32,
    pub big_blind: u32,
    pub hero_turn: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Hero must hold 0 or 2 cards, got {0}")]
    HoleCardCount(usize),
    #[error("Board holds at most 5 cards, got {0}")]
    BoardTooLong(usize),
    #[error("Card {0} appears more than once")]
    DuplicateCard(Card),
}

impl TableSnapshot {
    /// Checks the card invariants the engine relies on.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if !matches!(self.hero_cards.len(), 0 | 2) {
            return Err(SnapshotError::HoleCardCount(self.hero_cards.len()));
        }
        if self.board.len() > 5 {
            return Err(SnapshotError::BoardTooLong(self.board.len()));
        }
        let mut seen = HashSet::new();
        for &card in self.hero_cards.iter().chain(&self.board) {
            if !seen.insert(card) {
                return Err(SnapshotError::DuplicateCard(card));
            }
        }
        Ok(())
    }

    pub fn opponent_stacks(&self) -> Vec<u32> {
        self.opponents.iter().map(|o| o.stack).collect()
    }

    /// Replaces each opponent's profile with the store's copy.
    pub fn load_profiles(&mut self, store: &dyn ProfileStore) {
        for opponent in &mut self.opponents {
            opponent.profile = store.load_profile(&opponent.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablesight_engine::cards::parse_cards;

    #[test]
    fn accepts_empty_and_full_hands() {
        assert_eq!(TableSnapshot::default().validate(), Ok(()));
        let snap = TableSnapshot {
            hero_cards: parse_cards("As Kd").unwrap(),
            board: parse_cards("2c 3c 4c 5c 6c").unwrap(),
            ..TableSnapshot::default()
        };
        assert_eq!(snap.validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_card_sets() {
        let one = TableSnapshot {
            hero_cards: parse_cards("As").unwrap(),
            ..TableSnapshot::default()
        };
        assert_eq!(one.validate(), Err(SnapshotError::HoleCardCount(1)));

        let long = TableSnapshot {
            board: parse_cards("2c 3c 4c 5c 6c 7c").unwrap(),
            ..TableSnapshot::default()
        };
        assert_eq!(long.validate(), Err(SnapshotError::BoardTooLong(6)));

        let dup = TableSnapshot {
            hero_cards: parse_cards("As Kd").unwrap(),
            board: parse_cards("Kd 7h 2s").unwrap(),
            ..TableSnapshot::default()
        };
        assert!(matches!(dup.validate(), Err(SnapshotError::DuplicateCard(_))));
    }

    #[test]
    fn load_profiles_pulls_from_store() {
        use crate::profile::{MemoryProfileStore, ObservedAction};

        let mut store = MemoryProfileStore::new();
        let mut villain = OpponentProfile::default();
        villain.record(ObservedAction::Raise);
        store.save_profile("seat2", &villain);

        let mut snap = TableSnapshot {
            opponents: vec![
                SeatedOpponent {
                    id: "seat2".into(),
                    stack: 900,
                    ..SeatedOpponent::default()
                },
                SeatedOpponent {
                    id: "seat5".into(),
                    stack: 400,
                    ..SeatedOpponent::default()
                },
            ],
            ..TableSnapshot::default()
        };
        snap.load_profiles(&store);
        assert_eq!(snap.opponents[0].profile, villain);
        assert_eq!(snap.opponents[1].profile, OpponentProfile::default());
    }

    #[test]
    fn deserializes_observer_json() {
        let snap: TableSnapshot = serde_json::from_str(
            r#"{
                "hero_cards": ["Ah", "Qh"],
                "board": ["Th", "7c", "2h"],
                "pot": 300,
                "call_amount": 100,
                "hero_stack": 2400,
                "opponents": [{"id": "seat3", "stack": 1800}],
                "big_blind": 20,
                "hero_turn": true
            }"#,
        )
        .unwrap();
        assert_eq!(snap.hero_cards.len(), 2);
        assert_eq!(snap.opponent_stacks(), vec![1800]);
        assert_eq!(snap.opponents[0].profile, OpponentProfile::default());
        assert_eq!(snap.validate(), Ok(()));
    }
}
