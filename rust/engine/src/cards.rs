use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CardError;

/// One of the four suits in a standard 52-card deck.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    /// Dense index 0..4, used for suit histograms.
    pub fn index(self) -> usize {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    pub fn from_char(c: char) -> Option<Suit> {
        match c {
            'c' | 'C' | '♣' => Some(Suit::Clubs),
            'd' | 'D' | '♦' => Some(Suit::Diamonds),
            'h' | 'H' | '♥' => Some(Suit::Hearts),
            's' | 'S' | '♠' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// Rank (face value) of a playing card from Two through Ace.
/// The discriminant is the numeric value used by hand evaluation (Ace = 14).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
    /// Ace (14). Also plays low in the wheel straight.
    Ace,
}

impl Rank {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(v: u8) -> Option<Rank> {
        let rank = match v {
            2 => Rank::Two,
            3 => Rank::Three,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            14 => Rank::Ace,
            _ => return None,
        };
        Some(rank)
    }

    pub fn symbol(self) -> char {
        match self {
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
            r => char::from(b'0' + r.value()),
        }
    }

    fn parse(text: &str) -> Option<Rank> {
        match text {
            "T" | "t" | "10" => Some(Rank::Ten),
            "J" | "j" => Some(Rank::Jack),
            "Q" | "q" => Some(Rank::Queen),
            "K" | "k" => Some(Rank::King),
            "A" | "a" => Some(Rank::Ace),
            _ => text
                .parse::<u8>()
                .ok()
                .filter(|v| (2..=9).contains(v))
                .and_then(Rank::from_value),
        }
    }
}

/// A single playing card with a suit and rank.
///
/// Cards are immutable values; the table observer rebuilds them every tick.
/// Serialized as short text such as `"As"` or `"Td"`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    /// The suit of the card (Clubs, Diamonds, Hearts, or Spades)
    pub suit: Suit,
    /// The rank of the card (Two through Ace)
    pub rank: Rank,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let suit_char = text
            .chars()
            .last()
            .ok_or_else(|| CardError::InvalidText(s.to_string()))?;
        let rank_text = &text[..text.len() - suit_char.len_utf8()];
        if rank_text.is_empty() {
            return Err(CardError::InvalidText(s.to_string()));
        }
        let suit = Suit::from_char(suit_char).ok_or(CardError::InvalidSuit(suit_char))?;
        let rank = Rank::parse(rank_text).ok_or_else(|| CardError::InvalidRank(rank_text.into()))?;
        Ok(Card { suit, rank })
    }
}

impl TryFrom<String> for Card {
    type Error = CardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

/// Parses a whitespace or comma separated card list such as `"As Kd, 7h"`.
///
/// # Errors
///
/// Returns [`CardError::DuplicateCard`] if the same card appears twice, or the
/// parse error of the first malformed token.
///
/// ```
/// use tablesight_engine::cards::{parse_cards, Card, Rank, Suit};
///
/// let cards = parse_cards("As Kd").unwrap();
/// assert_eq!(cards, vec![Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::King, Suit::Diamonds)]);
/// ```
pub fn parse_cards(text: &str) -> Result<Vec<Card>, CardError> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for token in text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
    {
        let card: Card = token.parse()?;
        if !seen.insert(card) {
            return Err(CardError::DuplicateCard(card));
        }
        out.push(card);
    }
    Ok(out)
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { suit: s, rank: r });
        }
    }
    v
}
