//! # tablesight-ai: Decision Support for Texas Hold'em
//!
//! Turns one observation of a live table into equity, outcome projections and
//! an action recommendation for the hero.
//!
//! ## Core Components
//!
//! - [`range`] - Opponent range model and the pluggable [`range::HandSampler`]
//! - [`equity`] - Monte Carlo equity against biased opponent ranges
//! - [`projection`] - Final hand category distribution over the remaining board
//! - [`decision`] - Rule-based recommendation from equity, price and stacks
//! - [`advisor`] - Facade running all of the above for a [`snapshot::TableSnapshot`]
//!
//! ## Quick Start
//!
//! ```rust
//! use tablesight_ai::advisor::Advisor;
//! use tablesight_ai::config::AdvisorConfig;
//! use tablesight_ai::snapshot::{SeatedOpponent, TableSnapshot};
//! use tablesight_engine::cards::parse_cards;
//!
//! let config = AdvisorConfig {
//!     iterations: 300,
//!     seed: Some(42),
//!     ..AdvisorConfig::default()
//! };
//! let mut advisor = Advisor::new(config).expect("valid config");
//!
//! let snapshot = TableSnapshot {
//!     hero_cards: parse_cards("Ah Kh").unwrap(),
//!     board: parse_cards("Qh 7h 2c").unwrap(),
//!     pot: 300,
//!     call_amount: 100,
//!     hero_stack: 2_000,
//!     opponents: vec![SeatedOpponent {
//!         id: "seat4".into(),
//!         stack: 1_500,
//!         ..SeatedOpponent::default()
//!     }],
//!     big_blind: 20,
//!     hero_turn: true,
//!     ..TableSnapshot::default()
//! };
//!
//! let advice = advisor.advise(&snapshot).expect("hero holds cards");
//! assert_eq!(advice.street, "Flop");
//! assert!(advice.recommendation.is_some());
//! ```
//!
//! ## Determinism
//!
//! Everything except the random stream is a pure function of its inputs. Give
//! the advisor a `seed` to reproduce a session exactly.

pub mod advisor;
pub mod cache;
pub mod config;
pub mod decision;
pub mod equity;
pub mod logging;
pub mod profile;
pub mod projection;
pub mod range;
pub mod snapshot;
