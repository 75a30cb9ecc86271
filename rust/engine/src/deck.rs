use rand::Rng;

use crate::cards::{full_deck, Card};

/// The unseen portion of a 52-card deck.
///
/// Built from the full deck minus the cards already known (hero hole cards and
/// board). Every draw removes the card it returns, so one `Deck` can be shared
/// by board completion and all opponents within a single simulated deal
/// without ever producing a duplicate.
///
/// ```
/// use tablesight_engine::cards::parse_cards;
/// use tablesight_engine::deck::Deck;
///
/// let dead = parse_cards("As Kd 7h 8h 9c").unwrap();
/// let deck = Deck::without(&dead);
/// assert_eq!(deck.len(), 47);
/// ```
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn full() -> Self {
        Self { cards: full_deck() }
    }

    pub fn without(dead: &[Card]) -> Self {
        let cards = full_deck()
            .into_iter()
            .filter(|c| !dead.contains(c))
            .collect();
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Removes `card` if present. Returns whether it was in the deck.
    pub fn remove(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|&c| c == card) {
            Some(i) => {
                self.cards.swap_remove(i);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the card at `index` (order is not preserved).
    pub fn take_at(&mut self, index: usize) -> Option<Card> {
        if index < self.cards.len() {
            Some(self.cards.swap_remove(index))
        } else {
            None
        }
    }

    /// Draws one uniformly random card.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Card> {
        if self.cards.is_empty() {
            return None;
        }
        let i = rng.random_range(0..self.cards.len());
        Some(self.cards.swap_remove(i))
    }

    /// Draws two uniformly random cards, or nothing if fewer than two remain.
    pub fn draw_pair<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<[Card; 2]> {
        if self.cards.len() < 2 {
            return None;
        }
        let a = self.draw(rng)?;
        let b = self.draw(rng)?;
        Some([a, b])
    }

    /// Draws cards until `out` holds `target` cards.
    pub fn fill_to<R: Rng + ?Sized>(&mut self, out: &mut Vec<Card>, target: usize, rng: &mut R) {
        while out.len() < target {
            match self.draw(rng) {
                Some(c) => out.push(c),
                None => break,
            }
        }
    }
}
