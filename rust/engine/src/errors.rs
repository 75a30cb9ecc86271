use thiserror::Error;

use crate::cards::Card;

/// Errors raised while turning card text or card lists into validated values.
///
/// The evaluation routines themselves never fail; these only surface at the
/// boundary where observed table state is converted into [`Card`]s.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("Invalid card text: {0:?}")]
    InvalidText(String),
    #[error("Invalid rank: {0:?}")]
    InvalidRank(String),
    #[error("Invalid suit: {0:?}")]
    InvalidSuit(char),
    #[error("Duplicate card: {0}")]
    DuplicateCard(Card),
}
