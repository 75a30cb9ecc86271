//! Rule-based action recommendation.
//!
//! Every input arrives as a plain value and [`recommend`] is a pure function of
//! them, so identical inputs always produce an identical [`Recommendation`].
//! Each heuristic (pot odds, call threshold, strength tier, preflop strength,
//! sizing) is a separate named function and can be tuned on its own.

use serde::{Deserialize, Serialize};
use tablesight_engine::cards::Card;
use tablesight_engine::hand::Category;
use tablesight_engine::street::Street;
use tablesight_engine::texture::{is_low_risk, MadeHand, TextureTag};
use tracing::debug;

use crate::projection::DistributionResult;

/// Pot fractions for the medium, strong and monster tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeTiers {
    pub medium: f64,
    pub strong: f64,
    pub monster: f64,
}

/// Tunable constants of the decision rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeConfig {
    pub name: String,
    /// Percent added to pot odds before a call is considered profitable.
    pub call_edge: f64,
    /// Percent a drawing hand may fall short of the call threshold.
    pub bluff_edge: f64,
    pub bet: SizeTiers,
    pub raise: SizeTiers,
}

impl ModeConfig {
    pub fn balanced() -> Self {
        Self {
            name: "balanced".to_string(),
            call_edge: 3.0,
            bluff_edge: 6.0,
            bet: SizeTiers {
                medium: 0.45,
                strong: 0.60,
                monster: 0.80,
            },
            raise: SizeTiers {
                medium: 0.70,
                strong: 0.90,
                monster: 1.20,
            },
        }
    }

    pub fn aggressive() -> Self {
        Self {
            name: "aggressive".to_string(),
            call_edge: 1.0,
            bluff_edge: 3.0,
            bet: SizeTiers {
                medium: 0.50,
                strong: 0.70,
                monster: 1.00,
            },
            raise: SizeTiers {
                medium: 0.80,
                strong: 1.10,
                monster: 1.50,
            },
        }
    }

    pub fn conservative() -> Self {
        Self {
            name: "conservative".to_string(),
            call_edge: 6.0,
            bluff_edge: 10.0,
            bet: SizeTiers {
                medium: 0.40,
                strong: 0.55,
                monster: 0.75,
            },
            raise: SizeTiers {
                medium: 0.60,
                strong: 0.80,
                monster: 1.00,
            },
        }
    }
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self::balanced()
    }
}

/// Named preset selector for [`ModeConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Balanced,
    Aggressive,
    Conservative,
}

impl Mode {
    /// ```
    /// use tablesight_ai::decision::Mode;
    ///
    /// assert_eq!(Mode::from_name("Aggressive"), Some(Mode::Aggressive));
    /// assert_eq!(Mode::from_name("reckless"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Mode> {
        match name.trim().to_ascii_lowercase().as_str() {
            "balanced" => Some(Mode::Balanced),
            "aggressive" => Some(Mode::Aggressive),
            "conservative" => Some(Mode::Conservative),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Balanced => "balanced",
            Mode::Aggressive => "aggressive",
            Mode::Conservative => "conservative",
        }
    }

    pub fn config(self) -> ModeConfig {
        match self {
            Mode::Balanced => ModeConfig::balanced(),
            Mode::Aggressive => ModeConfig::aggressive(),
            Mode::Conservative => ModeConfig::conservative(),
        }
    }
}

/// Percent of the final pot the hero must win to break even on a call.
///
/// ```
/// use tablesight_ai::decision::pot_odds_pct;
///
/// assert_eq!(pot_odds_pct(100, 50), 100.0 / 3.0);
/// assert_eq!(pot_odds_pct(0, 0), 0.0);
/// ```
pub fn pot_odds_pct(pot: u32, to_call: u32) -> f64 {
    let total = pot as f64 + to_call as f64;
    if total <= 0.0 {
        return 0.0;
    }
    100.0 * to_call as f64 / total
}

/// Stack and price information for one decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackContext {
    pub hero_stack: u32,
    pub effective_stack: u32,
    /// The amount to call; a half-pot guess when the table did not show it.
    pub to_call: u32,
    pub pot_odds_pct: f64,
    pub stack_to_pot: f64,
    pub call_fraction: f64,
    pub opponent_count: usize,
    pub call_unknown: bool,
}

impl StackContext {
    pub fn new(
        hero_stack: u32,
        opponent_stacks: &[u32],
        pot: u32,
        call_amount: u32,
        call_unknown: bool,
    ) -> Self {
        let effective_stack = opponent_stacks
            .iter()
            .max()
            .map_or(hero_stack, |&deepest| hero_stack.min(deepest));
        let to_call = if call_unknown { pot / 2 } else { call_amount };
        let stack_to_pot = if pot == 0 {
            0.0
        } else {
            effective_stack as f64 / pot as f64
        };
        let call_fraction = if hero_stack == 0 {
            0.0
        } else {
            to_call as f64 / hero_stack as f64
        };
        Self {
            hero_stack,
            effective_stack,
            to_call,
            pot_odds_pct: pot_odds_pct(pot, to_call),
            stack_to_pot,
            call_fraction,
            opponent_count: opponent_stacks.len(),
            call_unknown,
        }
    }

    /// Whether the hero can act without putting chips in.
    pub fn is_free(&self) -> bool {
        self.to_call == 0 && !self.call_unknown
    }

    pub fn is_cheap(&self, big_blind: u32) -> bool {
        self.call_fraction <= 0.05 || self.to_call <= big_blind
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Weak,
    Medium,
    Strong,
    Monster,
}

/// Tier from win percent, promoted by a strong category unless the board
/// alone makes it.
pub fn strength_tier(win_pct: u8, category: Option<Category>, made_hand: Option<MadeHand>) -> Tier {
    let category = match made_hand {
        Some(m) if m.is_board_only() => Category::HighCard,
        _ => category.unwrap_or(Category::HighCard),
    };
    if win_pct >= 80 || category >= Category::FullHouse {
        Tier::Monster
    } else if win_pct >= 65 || (category >= Category::TwoPair && win_pct >= 55) {
        Tier::Strong
    } else if win_pct >= 50 {
        Tier::Medium
    } else {
        Tier::Weak
    }
}

/// Minimum win percent that justifies calling, clamped to 0..=100.
pub fn call_threshold(
    mode: &ModeConfig,
    stack: &StackContext,
    made_hand: Option<MadeHand>,
    texture: &[TextureTag],
    big_blind: u32,
) -> f64 {
    let mut threshold = stack.pot_odds_pct + mode.call_edge;

    if stack.opponent_count >= 3 {
        threshold += (3.0 * (stack.opponent_count - 2) as f64).min(9.0);
    }
    if stack.call_fraction >= 0.5 {
        threshold += 5.0;
    }
    let weak_hand = made_hand.is_none_or(MadeHand::is_weak);
    if stack.stack_to_pot > 0.0 && stack.stack_to_pot <= 2.0 && weak_hand {
        threshold += 4.0;
    }
    if stack.is_cheap(big_blind) {
        threshold -= 3.0;
    }
    if is_low_risk(texture) && stack.call_fraction <= 0.15 {
        threshold -= 2.0;
    }
    threshold.clamp(0.0, 100.0)
}

/// Starting-hand strength on a 0..=10 scale.
///
/// - 9-10: AA-JJ, AKs
/// - 7-8: TT-99, AK, AQ, KQs
/// - 5-6: 88-77, AJ, KQ, suited broadways and connectors
/// - 3-4: small pairs, weak aces, offsuit broadways
/// - 0-2: everything else
pub fn starting_hand_strength(a: Card, b: Card) -> u8 {
    let (high, low) = if a.rank >= b.rank {
        (a.rank.value(), b.rank.value())
    } else {
        (b.rank.value(), a.rank.value())
    };
    let suited = a.suit == b.suit;

    if high == low {
        return match high {
            13..=14 => 10,
            11..=12 => 9,
            10 => 8,
            9 => 7,
            8 => 6,
            7 => 5,
            _ => 4,
        };
    }

    let (with_suit, offsuit) = match (high, low) {
        (14, 13) => (10, 8),
        (14, 12) => (8, 7),
        (14, 11) => (7, 6),
        (14, 10) => (6, 5),
        (14, _) => (5, 4),
        (13, 12) => (7, 6),
        (13, 11) => (6, 5),
        (13, 10) => (5, 4),
        (12, 11) => (6, 5),
        (12, 10) => (5, 4),
        _ if suited && high - low <= 2 => return if high >= 9 { 5 } else { 4 },
        // Broadway cards
        _ if high >= 11 && low >= 9 => return 4,
        _ => return 2,
    };
    if suited { with_suit } else { offsuit }
}

/// Pocket jacks or better, or two cards queen or better.
pub fn is_premium(a: Card, b: Card) -> bool {
    let (high, low) = (a.rank.max(b.rank).value(), a.rank.min(b.rank).value());
    (high == low && high >= 11) || low >= 12
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    CallOrRaise,
}

impl Action {
    pub fn verb(self) -> &'static str {
        match self {
            Action::Fold => "Fold",
            Action::Check => "Check",
            Action::Call => "Call",
            Action::Bet => "Bet",
            Action::Raise => "Raise",
            Action::CallOrRaise => "Call or raise",
        }
    }
}

/// How strongly the presentation layer should stress the advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Urgency {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: Action,
    /// Chips to put in, when the action has a size.
    pub amount: Option<u32>,
    pub sizing_label: String,
    pub rationale: String,
    pub urgency: Urgency,
}

impl Recommendation {
    fn without_size(action: Action, rationale: String, urgency: Urgency) -> Self {
        Self {
            action,
            amount: None,
            sizing_label: String::new(),
            rationale,
            urgency,
        }
    }

    /// Rounds `amount` to whole chips and relabels it all-in when it covers the stack.
    fn sized(
        action: Action,
        amount: f64,
        label: String,
        hero_stack: u32,
        rationale: String,
        urgency: Urgency,
    ) -> Self {
        let amount = amount.round().max(0.0) as u32;
        if hero_stack > 0 && amount >= hero_stack {
            return Self {
                action,
                amount: Some(hero_stack),
                sizing_label: "All-in".to_string(),
                rationale,
                urgency: Urgency::High,
            };
        }
        Self {
            action,
            amount: Some(amount),
            sizing_label: label,
            rationale,
            urgency,
        }
    }
}

fn pot_label(fraction: f64) -> String {
    format!("{}% pot", (fraction * 100.0).round() as u32)
}

/// Everything the rules look at for one decision.
#[derive(Debug, Clone, Copy)]
pub struct DecisionInput<'a> {
    pub street: Street,
    pub hole: &'a [Card],
    pub win_pct: u8,
    pub texture: &'a [TextureTag],
    pub distribution: Option<&'a DistributionResult>,
    pub pot: u32,
    pub big_blind: u32,
    pub hero_category: Option<Category>,
    pub made_hand: Option<MadeHand>,
    pub stack: StackContext,
}

impl DecisionInput<'_> {
    fn improve_pct(&self) -> u8 {
        if self.street.is_river() {
            return 0;
        }
        self.distribution.map_or(0, |d| d.improve_pct)
    }
}

/// Picks an action for the hero. Rules are checked in priority order and the
/// first match wins.
pub fn recommend(mode: &ModeConfig, input: &DecisionInput<'_>) -> Recommendation {
    let rec = if input.street == Street::Preflop {
        preflop(mode, input)
    } else {
        postflop(mode, input)
    };
    debug!(
        mode = %mode.name,
        street = input.street.label(),
        win_pct = input.win_pct,
        action = rec.action.verb(),
        amount = ?rec.amount,
        rationale = %rec.rationale,
        "recommendation"
    );
    rec
}

fn postflop(mode: &ModeConfig, input: &DecisionInput<'_>) -> Recommendation {
    let stack = &input.stack;
    let win = input.win_pct;
    let improve = input.improve_pct();

    if stack.is_free() {
        let tier = strength_tier(win, input.hero_category, input.made_hand);
        let fraction = match tier {
            Tier::Monster => mode.bet.monster,
            Tier::Strong => mode.bet.strong,
            Tier::Medium => mode.bet.medium,
            Tier::Weak if !input.street.is_river() && improve >= 28 => {
                let fraction = mode.bet.medium / 2.0;
                return Recommendation::sized(
                    Action::Bet,
                    sized_bet(input.pot, fraction, input.big_blind),
                    pot_label(fraction),
                    stack.hero_stack,
                    format!("Semi-bluff: {improve}% to improve"),
                    Urgency::Medium,
                );
            }
            Tier::Weak => {
                return Recommendation::without_size(
                    Action::Check,
                    format!("Weak hand at {win}%: check"),
                    Urgency::Low,
                );
            }
        };
        let urgency = if tier == Tier::Monster {
            Urgency::High
        } else {
            Urgency::Medium
        };
        return Recommendation::sized(
            Action::Bet,
            sized_bet(input.pot, fraction, input.big_blind),
            pot_label(fraction),
            stack.hero_stack,
            format!("{tier:?} hand at {win}%: bet for value"),
            urgency,
        );
    }

    let threshold = call_threshold(mode, stack, input.made_hand, input.texture, input.big_blind);
    let margin = win as f64 - threshold;
    let need = threshold.round() as u32;

    if margin >= 20.0 {
        let fraction = mode.raise.monster;
        return Recommendation::sized(
            Action::Raise,
            sized_raise(input.pot, stack.to_call, fraction),
            pot_label(fraction),
            stack.hero_stack,
            format!("Win {win}% vs {need}% needed: raise"),
            Urgency::High,
        );
    }
    if margin >= 10.0 {
        let fraction = mode.raise.strong;
        return Recommendation::sized(
            Action::CallOrRaise,
            sized_raise(input.pot, stack.to_call, fraction),
            pot_label(fraction),
            stack.hero_stack,
            format!("Win {win}% vs {need}% needed: call, raise for value"),
            Urgency::Medium,
        );
    }
    if margin >= 0.0 {
        return call(stack, format!("Win {win}% vs {need}% needed: call"));
    }
    if stack.is_cheap(input.big_blind) && margin >= -6.0 {
        return call(stack, format!("Cheap price, win {win}% near {need}%: speculative call"));
    }
    if !input.street.is_river() && improve >= 30 && win as f64 >= threshold - mode.bluff_edge {
        return call(stack, format!("Drawing: {improve}% to improve, win {win}%"));
    }
    Recommendation::without_size(
        Action::Fold,
        format!("Win {win}% below {need}% needed: fold"),
        Urgency::Low,
    )
}

fn preflop(mode: &ModeConfig, input: &DecisionInput<'_>) -> Recommendation {
    let stack = &input.stack;
    let (strength, premium) = match input.hole {
        &[a, b] => (starting_hand_strength(a, b), is_premium(a, b)),
        _ => (0, false),
    };
    let crowd = u8::from(stack.opponent_count >= 3) + u8::from(stack.opponent_count >= 5);
    let (open, call_at, shove) = (7 + crowd, 5 + crowd, 8 + crowd);
    let raise_action = if stack.is_free() {
        Action::Bet
    } else {
        Action::Raise
    };

    let short = input.big_blind > 0 && stack.effective_stack <= input.big_blind.saturating_mul(12);
    if short && (premium || strength >= shove) {
        return Recommendation::sized(
            raise_action,
            stack.hero_stack as f64,
            "All-in".to_string(),
            stack.hero_stack,
            format!("Short stack with strength {strength}/10: shove"),
            Urgency::High,
        );
    }
    if premium || strength >= open {
        let fraction = if premium {
            mode.raise.monster
        } else {
            mode.raise.medium
        };
        let size = (3.0 * input.big_blind as f64).max(sized_raise(input.pot, stack.to_call, fraction));
        let urgency = if premium { Urgency::High } else { Urgency::Medium };
        return Recommendation::sized(
            raise_action,
            size,
            pot_label(fraction),
            stack.hero_stack,
            format!("Strength {strength}/10 clears open at {open}: raise"),
            urgency,
        );
    }
    if stack.is_free() {
        return Recommendation::without_size(
            Action::Check,
            format!("Strength {strength}/10: check"),
            Urgency::Low,
        );
    }
    if strength >= call_at {
        return call(stack, format!("Strength {strength}/10 clears call at {call_at}: call"));
    }
    Recommendation::without_size(
        Action::Fold,
        format!("Strength {strength}/10 below {call_at}: fold"),
        Urgency::Low,
    )
}

fn call(stack: &StackContext, rationale: String) -> Recommendation {
    if stack.call_unknown {
        return Recommendation {
            action: Action::Call,
            amount: None,
            sizing_label: "Amount unknown".to_string(),
            rationale,
            urgency: Urgency::Medium,
        };
    }
    Recommendation::sized(
        Action::Call,
        stack.to_call as f64,
        format!("{} to call", stack.to_call),
        stack.hero_stack,
        rationale,
        Urgency::Medium,
    )
}

fn sized_bet(pot: u32, fraction: f64, big_blind: u32) -> f64 {
    (pot as f64 * fraction).max(big_blind as f64)
}

fn sized_raise(pot: u32, to_call: u32, fraction: f64) -> f64 {
    let to_call = to_call as f64;
    (to_call + fraction * (pot as f64 + to_call)).max(2.0 * to_call)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablesight_engine::cards::parse_cards;

    fn card_pair(text: &str) -> (Card, Card) {
        let c = parse_cards(text).unwrap();
        (c[0], c[1])
    }

    #[test]
    fn stack_context_math() {
        let s = StackContext::new(2000, &[500, 3000], 1000, 500, false);
        assert_eq!(s.effective_stack, 2000);
        assert!((s.pot_odds_pct - 100.0 / 3.0).abs() < 1e-9);
        assert!((s.stack_to_pot - 2.0).abs() < 1e-9);
        assert!((s.call_fraction - 0.25).abs() < 1e-9);

        let lone = StackContext::new(800, &[], 0, 0, false);
        assert_eq!(lone.effective_stack, 800);
        assert_eq!(lone.pot_odds_pct, 0.0);
        assert_eq!(lone.stack_to_pot, 0.0);

        let broke = StackContext::new(0, &[100], 100, 50, false);
        assert_eq!(broke.call_fraction, 0.0);
    }

    #[test]
    fn unknown_call_is_half_pot() {
        let s = StackContext::new(5000, &[5000], 600, 0, true);
        assert_eq!(s.to_call, 300);
        assert!(!s.is_free());
    }

    #[test]
    fn tiers_follow_win_and_category() {
        assert_eq!(strength_tier(85, Some(Category::OnePair), None), Tier::Monster);
        assert_eq!(
            strength_tier(40, Some(Category::FullHouse), Some(MadeHand::FullHouse)),
            Tier::Monster
        );
        assert_eq!(strength_tier(57, Some(Category::TwoPair), None), Tier::Strong);
        assert_eq!(strength_tier(57, Some(Category::OnePair), None), Tier::Medium);
        assert_eq!(strength_tier(30, None, None), Tier::Weak);
    }

    #[test]
    fn board_made_category_does_not_promote() {
        assert_eq!(
            strength_tier(45, Some(Category::FullHouse), Some(MadeHand::BoardFullHouse)),
            Tier::Weak
        );
        assert_eq!(
            strength_tier(57, Some(Category::TwoPair), Some(MadeHand::BoardTwoPair)),
            Tier::Medium
        );
        assert_eq!(
            strength_tier(90, Some(Category::FourOfAKind), Some(MadeHand::BoardQuads)),
            Tier::Monster
        );
    }

    #[test]
    fn threshold_adjustments_stack() {
        let mode = ModeConfig::balanced();
        let heads_up = StackContext::new(5000, &[5000], 1000, 500, false);
        let base = call_threshold(&mode, &heads_up, Some(MadeHand::TopPair), &[TextureTag::FlushComplete], 10);
        assert!((base - (100.0 / 3.0 + 3.0)).abs() < 1e-9);

        let multiway = StackContext::new(5000, &[5000; 6], 1000, 500, false);
        let wide = call_threshold(&mode, &multiway, Some(MadeHand::TopPair), &[TextureTag::FlushComplete], 10);
        assert!((wide - base - 9.0).abs() < 1e-9);

        let committed = StackContext::new(900, &[900], 1000, 500, false);
        let short = call_threshold(&mode, &committed, Some(MadeHand::Underpair), &[TextureTag::FlushComplete], 10);
        assert!((short - base - 9.0).abs() < 1e-9);
    }

    #[test]
    fn starting_hand_scale_reference_points() {
        let (a, b) = card_pair("Ah As");
        assert_eq!(starting_hand_strength(a, b), 10);
        let (a, b) = card_pair("Ah Kh");
        assert_eq!(starting_hand_strength(a, b), 10);
        let (a, b) = card_pair("Kd Ah");
        assert_eq!(starting_hand_strength(a, b), 8);
        let (a, b) = card_pair("9h 8h");
        assert_eq!(starting_hand_strength(a, b), 5);
        let (a, b) = card_pair("7h 2s");
        assert_eq!(starting_hand_strength(a, b), 2);
    }

    #[test]
    fn premium_override_cases() {
        let premium = |t: &str| {
            let (a, b) = card_pair(t);
            is_premium(a, b)
        };
        assert!(premium("Jc Jd"));
        assert!(premium("Qs Kd"));
        assert!(!premium("Tc Td"));
        assert!(!premium("As Jd"));
    }

    #[test]
    fn sizing_relabels_all_in() {
        let r = Recommendation::sized(Action::Bet, 950.4, "80% pot".into(), 900, String::new(), Urgency::Medium);
        assert_eq!(r.amount, Some(900));
        assert_eq!(r.sizing_label, "All-in");
        assert_eq!(r.urgency, Urgency::High);

        let r = Recommendation::sized(Action::Bet, 449.6, "45% pot".into(), 5000, String::new(), Urgency::Medium);
        assert_eq!(r.amount, Some(450));
        assert_eq!(r.sizing_label, "45% pot");
    }
}
