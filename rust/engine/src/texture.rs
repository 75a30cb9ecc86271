//! Board texture and made-hand classification.
//!
//! Texture tags describe risk in the shared cards alone. The made-hand
//! classifier relates the hero's hole cards to the board.

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// A structural risk in the shared cards.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TextureTag {
    FlushComplete,
    FourFlush,
    /// Three suited cards on a three-card board.
    Monotone,
    /// Three suited cards on a turn or river board.
    ThreeFlush,
    StraightOnBoard,
    FourStraight,
    ThreeStraight,
    Quads,
    FullHouse,
    Trips,
    DoublePaired,
    Paired,
    BroadwayHeavy,
}

impl TextureTag {
    pub fn label(self) -> &'static str {
        match self {
            TextureTag::FlushComplete => "Flush on board",
            TextureTag::FourFlush => "Four to a flush",
            TextureTag::Monotone => "Monotone",
            TextureTag::ThreeFlush => "Three to a flush",
            TextureTag::StraightOnBoard => "Straight on board",
            TextureTag::FourStraight => "Four to a straight",
            TextureTag::ThreeStraight => "Three to a straight",
            TextureTag::Quads => "Quads on board",
            TextureTag::FullHouse => "Full house on board",
            TextureTag::Trips => "Trips on board",
            TextureTag::DoublePaired => "Double-paired board",
            TextureTag::Paired => "Paired board",
            TextureTag::BroadwayHeavy => "Broadway-heavy",
        }
    }

    /// 1 (mild) to 3 (a strong hand is likely already made by someone).
    pub fn severity(self) -> u8 {
        match self {
            TextureTag::FlushComplete
            | TextureTag::FourFlush
            | TextureTag::StraightOnBoard
            | TextureTag::FourStraight
            | TextureTag::Quads
            | TextureTag::FullHouse => 3,
            TextureTag::Monotone
            | TextureTag::ThreeFlush
            | TextureTag::ThreeStraight
            | TextureTag::Trips
            | TextureTag::DoublePaired => 2,
            TextureTag::Paired | TextureTag::BroadwayHeavy => 1,
        }
    }
}

/// Risk tags for a board, highest-priority group first, at most three.
///
/// Groups in priority order: flush potential, straight potential, pairing,
/// broadway density. Boards with fewer than three cards carry no tags.
///
/// ```
/// use tablesight_engine::cards::parse_cards;
/// use tablesight_engine::texture::{board_texture, TextureTag};
///
/// let board = parse_cards("9h Th Jh").unwrap();
/// let tags = board_texture(&board);
/// assert_eq!(tags[0], TextureTag::Monotone);
/// assert_eq!(tags[1], TextureTag::ThreeStraight);
/// ```
pub fn board_texture(board: &[Card]) -> Vec<TextureTag> {
    if board.len() < 3 {
        return Vec::new();
    }
    let mut tags = Vec::with_capacity(4);
    tags.extend(flush_tag(board));
    tags.extend(straight_tag(board));
    tags.extend(pairing_tag(board));
    let broadway = board.iter().filter(|c| c.rank.value() >= 10).count();
    if broadway >= 3 {
        tags.push(TextureTag::BroadwayHeavy);
    }
    tags.truncate(3);
    tags
}

/// True when no tag is more than mildly dangerous.
pub fn is_low_risk(tags: &[TextureTag]) -> bool {
    tags.iter().all(|t| t.severity() <= 1)
}

fn flush_tag(board: &[Card]) -> Option<TextureTag> {
    let mut suit_counts = [0usize; 4];
    for c in board {
        suit_counts[c.suit.index()] += 1;
    }
    match suit_counts.iter().copied().max().unwrap_or(0) {
        n if n >= 5 => Some(TextureTag::FlushComplete),
        4 => Some(TextureTag::FourFlush),
        3 if board.len() == 3 => Some(TextureTag::Monotone),
        3 => Some(TextureTag::ThreeFlush),
        _ => None,
    }
}

fn straight_tag(board: &[Card]) -> Option<TextureTag> {
    // Bit r set when rank r is on board; Ace also sets bit 1.
    let mut mask: u16 = 0;
    for c in board {
        mask |= 1 << c.rank.value();
    }
    if mask & (1 << 14) != 0 {
        mask |= 1 << 1;
    }
    let best = (1..=10u16)
        .map(|low| ((mask >> low) & 0b1_1111).count_ones())
        .max()
        .unwrap_or(0);
    match best {
        5 => Some(TextureTag::StraightOnBoard),
        4 => Some(TextureTag::FourStraight),
        3 => Some(TextureTag::ThreeStraight),
        _ => None,
    }
}

fn pairing_tag(board: &[Card]) -> Option<TextureTag> {
    let counts = rank_counts(board);
    let quads = counts.iter().any(|&n| n == 4);
    let trips = counts.iter().any(|&n| n == 3);
    let pairs = counts.iter().filter(|&&n| n == 2).count();
    if quads {
        Some(TextureTag::Quads)
    } else if trips && pairs > 0 {
        Some(TextureTag::FullHouse)
    } else if trips {
        Some(TextureTag::Trips)
    } else if pairs >= 2 {
        Some(TextureTag::DoublePaired)
    } else if pairs == 1 {
        Some(TextureTag::Paired)
    } else {
        None
    }
}

fn rank_counts(cards: &[Card]) -> [u8; 15] {
    let mut counts = [0u8; 15];
    for c in cards {
        counts[c.rank.value() as usize] += 1;
    }
    counts
}

/// How the hero's hole cards combine with the board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum MadeHand {
    // Hole cards play no part.
    BoardQuads,
    BoardFullHouse,
    BoardTrips,
    BoardTwoPair,
    BoardPair,
    // Pocket pairs.
    PocketQuads,
    PocketFullHouse,
    Set,
    Overpair,
    Underpair,
    PocketPair,
    // Board cards paired by one or both hole cards.
    Quads,
    FullHouse,
    Trips,
    TwoPair,
    TopPair,
    Pair,
}

impl MadeHand {
    pub fn label(self) -> &'static str {
        match self {
            MadeHand::BoardQuads => "Board quads",
            MadeHand::BoardFullHouse => "Board full house",
            MadeHand::BoardTrips => "Board trips",
            MadeHand::BoardTwoPair => "Board two pair",
            MadeHand::BoardPair => "Board pair",
            MadeHand::PocketQuads => "Quads (pocket pair)",
            MadeHand::PocketFullHouse => "Full house (set)",
            MadeHand::Set => "Set",
            MadeHand::Overpair => "Overpair",
            MadeHand::Underpair => "Underpair",
            MadeHand::PocketPair => "Pocket pair",
            MadeHand::Quads => "Quads",
            MadeHand::FullHouse => "Full house",
            MadeHand::Trips => "Trips",
            MadeHand::TwoPair => "Two pair",
            MadeHand::TopPair => "Top pair",
            MadeHand::Pair => "Pair",
        }
    }

    /// The board alone makes this hand; the hole cards at most kick.
    pub fn is_board_only(self) -> bool {
        matches!(
            self,
            MadeHand::BoardQuads
                | MadeHand::BoardFullHouse
                | MadeHand::BoardTrips
                | MadeHand::BoardTwoPair
                | MadeHand::BoardPair
        )
    }

    /// Hands that rarely hold up against a committed opponent.
    pub fn is_weak(self) -> bool {
        self.is_board_only()
            || matches!(
                self,
                MadeHand::Underpair
                    | MadeHand::PocketPair
                    | MadeHand::Pair
            )
    }
}

/// Classifies the hero's made hand relative to the board.
///
/// Returns the most specific applicable class, or `None` when the hole cards
/// share no rank with the board, are not a pocket pair, and the board itself
/// is unpaired (or when hole cards are not exactly two).
pub fn classify_made_hand(hole: &[Card], board: &[Card]) -> Option<MadeHand> {
    let [a, b] = hole else {
        return None;
    };
    let board_counts = rank_counts(board);
    let (ra, rb) = (a.rank.value(), b.rank.value());

    if ra == rb {
        if board.is_empty() {
            return Some(MadeHand::PocketPair);
        }
        let hits = board_counts[ra as usize];
        if hits >= 2 {
            return Some(MadeHand::PocketQuads);
        }
        if highest_repeated(&board_counts, &[ra], 4).is_some() {
            return Some(MadeHand::BoardQuads);
        }
        if hits == 1 {
            return Some(if highest_repeated(&board_counts, &[ra], 2).is_some() {
                MadeHand::PocketFullHouse
            } else {
                MadeHand::Set
            });
        }
        if let Some(trips) = highest_repeated(&board_counts, &[ra], 3) {
            // A higher board pair fills the house instead of the pocket pair.
            let board_pair = highest_repeated(&board_counts, &[ra, trips], 2);
            return Some(if board_pair.is_some_and(|p| p > ra) {
                MadeHand::BoardFullHouse
            } else {
                MadeHand::PocketFullHouse
            });
        }
        let max_board = board.iter().map(|c| c.rank.value()).max().unwrap_or(0);
        let min_board = board.iter().map(|c| c.rank.value()).min().unwrap_or(0);
        return Some(if ra > max_board {
            MadeHand::Overpair
        } else if ra < min_board {
            MadeHand::Underpair
        } else {
            MadeHand::PocketPair
        });
    }

    let hits_a = board_counts[ra as usize];
    let hits_b = board_counts[rb as usize];
    let trips_elsewhere = highest_repeated(&board_counts, &[ra, rb], 3).is_some();
    let paired_elsewhere = highest_repeated(&board_counts, &[ra, rb], 2).is_some();

    if hits_a >= 3 || hits_b >= 3 {
        return Some(MadeHand::Quads);
    }
    if highest_repeated(&board_counts, &[ra, rb], 4).is_some() {
        return Some(MadeHand::BoardQuads);
    }
    let hero_trips = hits_a == 2 || hits_b == 2;
    let hero_pair = hits_a >= 1 || hits_b >= 1;
    if (hero_trips && ((hits_a >= 1 && hits_b >= 1) || paired_elsewhere))
        || (hero_pair && trips_elsewhere)
    {
        return Some(MadeHand::FullHouse);
    }
    if hero_trips {
        return Some(MadeHand::Trips);
    }
    if hits_a == 1 && hits_b == 1 {
        return Some(MadeHand::TwoPair);
    }
    if hero_pair {
        if paired_elsewhere {
            return Some(MadeHand::TwoPair);
        }
        let paired = if hits_a == 1 { ra } else { rb };
        let top = board.iter().map(|c| c.rank.value()).max().unwrap_or(0);
        return Some(if paired == top {
            MadeHand::TopPair
        } else {
            MadeHand::Pair
        });
    }

    match pairing_tag(board) {
        Some(TextureTag::Quads) => Some(MadeHand::BoardQuads),
        Some(TextureTag::FullHouse) => Some(MadeHand::BoardFullHouse),
        Some(TextureTag::Trips) => Some(MadeHand::BoardTrips),
        Some(TextureTag::DoublePaired) => Some(MadeHand::BoardTwoPair),
        Some(TextureTag::Paired) => Some(MadeHand::BoardPair),
        _ => None,
    }
}

/// Highest board rank outside `skip` seen at least `min` times.
fn highest_repeated(counts: &[u8; 15], skip: &[u8], min: u8) -> Option<u8> {
    (2..=14u8)
        .rev()
        .find(|r| !skip.contains(r) && counts[*r as usize] >= min)
}

/// Presentation text for [`classify_made_hand`]; empty when nothing is made.
pub fn made_hand_label(hole: &[Card], board: &[Card]) -> String {
    classify_made_hand(hole, board)
        .map(|m| m.label().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn cards(text: &str) -> Vec<Card> {
        parse_cards(text).unwrap()
    }

    #[test]
    fn flush_group_levels() {
        assert_eq!(board_texture(&cards("2h 7h Kh"))[0], TextureTag::Monotone);
        assert_eq!(board_texture(&cards("2h 7h Kh 9c"))[0], TextureTag::ThreeFlush);
        assert_eq!(board_texture(&cards("2h 7h Kh 9h"))[0], TextureTag::FourFlush);
        assert_eq!(
            board_texture(&cards("2h 7h Kh 9h 4h"))[0],
            TextureTag::FlushComplete
        );
    }

    #[test]
    fn straight_detection_counts_ace_low() {
        let tags = board_texture(&cards("Ac 2d 3h 9s"));
        assert_eq!(tags, vec![TextureTag::ThreeStraight]);
        let tags = board_texture(&cards("5c 6d 7h 8s Kd"));
        assert_eq!(tags, vec![TextureTag::FourStraight]);
        let tags = board_texture(&cards("Tc Jd Qh Ks Ad"));
        assert_eq!(
            tags,
            vec![TextureTag::StraightOnBoard, TextureTag::BroadwayHeavy]
        );
    }

    #[test]
    fn pairing_group_picks_most_specific() {
        assert_eq!(board_texture(&cards("2c 2d 9h")), vec![TextureTag::Paired]);
        assert_eq!(
            board_texture(&cards("2c 2d 9h 9s")),
            vec![TextureTag::DoublePaired]
        );
        assert_eq!(
            board_texture(&cards("2c 2d 2h 9s 9d")),
            vec![TextureTag::FullHouse]
        );
        assert_eq!(
            board_texture(&cards("2c 2d 2h 2s Kd")),
            vec![TextureTag::Quads]
        );
    }

    #[test]
    fn tags_are_capped_at_three() {
        // Flush, straight, pairing and broadway all present.
        let tags = board_texture(&cards("Th Jh Qh Qd"));
        assert_eq!(tags.len(), 3);
        assert_eq!(tags[0], TextureTag::ThreeFlush);
        assert_eq!(tags[2], TextureTag::Paired);
    }

    #[test]
    fn short_boards_have_no_texture() {
        assert!(board_texture(&cards("Ah Kh")).is_empty());
        assert!(is_low_risk(&[]));
        assert!(is_low_risk(&[TextureTag::Paired]));
        assert!(!is_low_risk(&[TextureTag::FourFlush]));
    }

    #[test]
    fn pocket_pair_classes() {
        assert_eq!(
            classify_made_hand(&cards("Qs Qd"), &cards("9c 5h 2d")),
            Some(MadeHand::Overpair)
        );
        assert_eq!(
            classify_made_hand(&cards("3s 3d"), &cards("9c 5h 7d")),
            Some(MadeHand::Underpair)
        );
        assert_eq!(
            classify_made_hand(&cards("6s 6d"), &cards("9c 5h 2d")),
            Some(MadeHand::PocketPair)
        );
        assert_eq!(
            classify_made_hand(&cards("9s 9d"), &cards("9c 5h 2d")),
            Some(MadeHand::Set)
        );
        assert_eq!(
            classify_made_hand(&cards("9s 9d"), &cards("9c 9h 2d")),
            Some(MadeHand::PocketQuads)
        );
        assert_eq!(
            classify_made_hand(&cards("Ks Kd"), &[]),
            Some(MadeHand::PocketPair)
        );
    }

    #[test]
    fn hero_pairs_the_board() {
        assert_eq!(
            classify_made_hand(&cards("As Kd"), &cards("Kc 5h 2d")),
            Some(MadeHand::TopPair)
        );
        assert_eq!(
            classify_made_hand(&cards("As 5d"), &cards("Kc 5h 2d")),
            Some(MadeHand::Pair)
        );
        assert_eq!(
            classify_made_hand(&cards("Ks 5d"), &cards("Kc 5h 2d")),
            Some(MadeHand::TwoPair)
        );
        assert_eq!(
            classify_made_hand(&cards("Ks 2d"), &cards("Kc Kh 2c")),
            Some(MadeHand::FullHouse)
        );
        assert_eq!(
            classify_made_hand(&cards("Ks 7d"), &cards("Kc Kh 2d")),
            Some(MadeHand::Trips)
        );
        assert_eq!(
            classify_made_hand(&cards("Ks 7d"), &cards("Kc Kh Kd")),
            Some(MadeHand::Quads)
        );
    }

    #[test]
    fn board_only_and_nothing() {
        assert_eq!(
            classify_made_hand(&cards("As Jd"), &cards("8c 8h 2d")),
            Some(MadeHand::BoardPair)
        );
        assert_eq!(
            classify_made_hand(&cards("As Jd"), &cards("8c 8h 2d 2s")),
            Some(MadeHand::BoardTwoPair)
        );
        assert_eq!(classify_made_hand(&cards("As Jd"), &cards("8c 7h 2d")), None);
        assert_eq!(made_hand_label(&cards("As Jd"), &cards("8c 7h 2d")), "");
        assert_eq!(made_hand_label(&[], &cards("8c 7h 2d")), "");
        assert!(MadeHand::BoardPair.is_weak());
        assert!(!MadeHand::Set.is_weak());
    }

    #[test]
    fn trips_on_board_fill_a_hero_pair() {
        assert_eq!(
            classify_made_hand(&cards("As Kd"), &cards("Kc 7h 7d 7s")),
            Some(MadeHand::FullHouse)
        );
        assert_eq!(
            classify_made_hand(&cards("Ks 2d"), &cards("Kc 2h 9d 9s 9c")),
            Some(MadeHand::FullHouse)
        );
        assert_eq!(
            classify_made_hand(&cards("9s 9d"), &cards("Kc Kh Kd 2s")),
            Some(MadeHand::PocketFullHouse)
        );
        assert_eq!(
            classify_made_hand(&cards("Qs Qd"), &cards("Kc Kh Kd 2s 2c")),
            Some(MadeHand::PocketFullHouse)
        );
        assert!(!MadeHand::PocketFullHouse.is_weak());
    }

    #[test]
    fn full_board_houses_play_for_everyone() {
        assert_eq!(
            classify_made_hand(&cards("2c 3d"), &cards("Kc Kd Kh 7s 7d")),
            Some(MadeHand::BoardFullHouse)
        );
        assert_eq!(made_hand_label(&cards("2c 3d"), &cards("Kc Kd Kh 7s 7d")), "Board full house");
        // Pocket pair below the board pair does not play.
        assert_eq!(
            classify_made_hand(&cards("4s 4d"), &cards("Kc Kd Kh 7s 7d")),
            Some(MadeHand::BoardFullHouse)
        );
        assert_eq!(
            classify_made_hand(&cards("Ac Ad"), &cards("5c 5d 5h 5s 9d")),
            Some(MadeHand::BoardQuads)
        );
        assert_eq!(
            classify_made_hand(&cards("2c 3d"), &cards("Kc Kd Kh 7s")),
            Some(MadeHand::BoardTrips)
        );
        assert!(MadeHand::BoardFullHouse.is_board_only());
        assert!(!MadeHand::FullHouse.is_board_only());
    }
}
