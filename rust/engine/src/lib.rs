//! # tablesight-engine: Card and Hand Evaluation Core
//!
//! Card model and pure evaluation routines for hold'em decision support:
//! best-hand evaluation over 5 to 7 cards, board texture risk tags and the
//! relationship between the hero's hole cards and the board.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card), text parsing and deck construction
//! - [`deck`] - The unseen remainder of the deck, with uniform random draws
//! - [`hand`] - Best five-card hand evaluation and strength comparison
//! - [`texture`] - Board texture tags and made-hand classification
//! - [`street`] - Betting street derived from the board
//! - [`errors`] - Error types for card parsing
//!
//! ## Quick Start
//!
//! ```rust
//! use tablesight_engine::cards::{Card, Rank, Suit};
//! use tablesight_engine::hand::{evaluate_hand, Category};
//!
//! // Evaluate a 7-card poker hand
//! let cards = [
//!     Card { suit: Suit::Hearts, rank: Rank::Ace },
//!     Card { suit: Suit::Hearts, rank: Rank::King },
//!     Card { suit: Suit::Hearts, rank: Rank::Queen },
//!     Card { suit: Suit::Hearts, rank: Rank::Jack },
//!     Card { suit: Suit::Hearts, rank: Rank::Ten },
//!     Card { suit: Suit::Clubs, rank: Rank::Two },
//!     Card { suit: Suit::Diamonds, rank: Rank::Three },
//! ];
//!
//! let strength = evaluate_hand(&cards).expect("seven cards always evaluate");
//! assert_eq!(strength.category, Category::StraightFlush);
//! ```
//!
//! ## Board Texture
//!
//! ```rust
//! use tablesight_engine::cards::parse_cards;
//! use tablesight_engine::texture::{board_texture, made_hand_label};
//!
//! let hole = parse_cards("As Kd").unwrap();
//! let board = parse_cards("Kc 8h 2h").unwrap();
//! assert!(board_texture(&board).is_empty());
//! assert_eq!(made_hand_label(&hole, &board), "Top pair");
//! ```

pub mod cards;
pub mod deck;
pub mod errors;
pub mod hand;
pub mod street;
pub mod texture;
