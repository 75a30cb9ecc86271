use serde::{Deserialize, Serialize};

/// A betting street in Texas Hold'em, derived from how many board cards are out.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Street {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
}

impl Street {
    /// Street for a board of `len` cards. Partial boards (1-2 cards) are still preflop.
    pub fn from_board_len(len: usize) -> Street {
        match len {
            0..=2 => Street::Preflop,
            3 => Street::Flop,
            4 => Street::Turn,
            _ => Street::River,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Street::Preflop => "Preflop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
        }
    }

    pub fn is_river(self) -> bool {
        self == Street::River
    }

    /// Board cards still to come.
    pub fn remaining_cards(self) -> usize {
        match self {
            Street::Preflop => 5,
            Street::Flop => 2,
            Street::Turn => 1,
            Street::River => 0,
        }
    }
}
