//! Candidate scoring rules
//!
//! Each rule looks at one candidate GPIO and either contributes a score
//! delta with a reason tag or stays silent. The ranker applies rules in a
//! fixed order, so tags always appear in rule order.

use alloc::string::String;
use core::fmt;

use crate::profile::{BoardProfile, Gpio};

/// Candidate score, higher is better
pub type Score = i32;

/// Bonus for pins on the board's preferred free pin list
pub const PREFERRED_PIN_BONUS: Score = 10;

/// Bonus for pins the board recommends for the requested bus signal
pub const BUS_RECOMMENDATION_BONUS: Score = 50;

/// Penalty for strapping pins on sensitive roles or in strict mode
pub const STRAPPING_AVOID_PENALTY: Score = -100;

/// Penalty for strapping pins otherwise
pub const STRAPPING_SOFT_PENALTY: Score = -25;

/// Roles that misbehave if a strapping pin is driven at reset
pub const SENSITIVE_ROLES: [&str; 4] = ["CS", "RST", "EN", "BOOT"];

/// Why a candidate scored the way it did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReasonTag {
    PreferredFreePin,
    /// Recommended for the contained bus role
    RecommendedFor(String),
    StrappingPinAvoided,
    StrappingPinLessPreferred,
    /// No rule fired
    FallbackAvailablePin,
}

impl fmt::Display for ReasonTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReasonTag::PreferredFreePin => f.write_str("preferred_free_pin"),
            ReasonTag::RecommendedFor(bus_role) => write!(f, "recommended_for_{}", bus_role),
            ReasonTag::StrappingPinAvoided => f.write_str("strapping_pin_avoided"),
            ReasonTag::StrappingPinLessPreferred => f.write_str("strapping_pin_less_preferred"),
            ReasonTag::FallbackAvailablePin => f.write_str("fallback_available_pin"),
        }
    }
}

/// Everything a rule may look at besides the candidate itself
#[derive(Debug, Clone, Copy)]
pub struct RankContext<'a> {
    pub role: &'a str,
    pub bus_role: Option<&'a str>,
    pub board: &'a BoardProfile,
    pub strict_avoid_boot: bool,
    /// Board recommendations for `bus_role`, resolved once per ranking
    pub recommended: &'a [Gpio],
}

impl<'a> RankContext<'a> {
    /// Build a context, resolving the bus recommendation list
    pub fn new(
        role: &'a str,
        bus_role: Option<&'a str>,
        board: &'a BoardProfile,
        strict_avoid_boot: bool,
    ) -> Self {
        let recommended = bus_role
            .map(|bus_role| board.recommendations.for_bus_role(bus_role))
            .unwrap_or(&[]);

        Self {
            role,
            bus_role,
            board,
            strict_avoid_boot,
            recommended,
        }
    }

    /// Check if the role is boot sensitive
    pub fn is_sensitive_role(&self) -> bool {
        SENSITIVE_ROLES.contains(&self.role)
    }
}

/// One rule's contribution to a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub delta: Score,
    pub tag: ReasonTag,
}

impl Contribution {
    pub fn new(delta: Score, tag: ReasonTag) -> Self {
        Self { delta, tag }
    }
}

/// A pure scoring rule
///
/// Rules must not depend on anything but their arguments, so rankings stay
/// reproducible.
pub trait ScoringRule: Send + Sync {
    /// Score one candidate, or return `None` if the rule does not apply
    fn score(&self, gpio: Gpio, ctx: &RankContext<'_>) -> Option<Contribution>;
}

/// Bonus for pins on the preferred free pin list
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferredPinRule;

impl ScoringRule for PreferredPinRule {
    fn score(&self, gpio: Gpio, ctx: &RankContext<'_>) -> Option<Contribution> {
        ctx.board
            .is_preferred(gpio)
            .then(|| Contribution::new(PREFERRED_PIN_BONUS, ReasonTag::PreferredFreePin))
    }
}

/// Bonus for pins recommended for the requested bus signal
#[derive(Debug, Clone, Copy, Default)]
pub struct BusRecommendationRule;

impl ScoringRule for BusRecommendationRule {
    fn score(&self, gpio: Gpio, ctx: &RankContext<'_>) -> Option<Contribution> {
        let bus_role = ctx.bus_role?;
        ctx.recommended.contains(&gpio).then(|| {
            Contribution::new(
                BUS_RECOMMENDATION_BONUS,
                ReasonTag::RecommendedFor(bus_role.into()),
            )
        })
    }
}

/// Penalty for strapping pins
///
/// Hard penalty in strict mode or for sensitive roles, soft penalty
/// otherwise. Never both.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrappingPenaltyRule;

impl ScoringRule for StrappingPenaltyRule {
    fn score(&self, gpio: Gpio, ctx: &RankContext<'_>) -> Option<Contribution> {
        if !ctx.board.is_strapping(gpio) {
            return None;
        }

        if ctx.strict_avoid_boot || ctx.is_sensitive_role() {
            Some(Contribution::new(
                STRAPPING_AVOID_PENALTY,
                ReasonTag::StrappingPinAvoided,
            ))
        } else {
            Some(Contribution::new(
                STRAPPING_SOFT_PENALTY,
                ReasonTag::StrappingPinLessPreferred,
            ))
        }
    }
}

/// Small per-gpio nudge subtracted from every score
///
/// Only distinguishes pins 50 or more apart, so it never decides between
/// candidates on typical boards.
pub const fn tie_break_nudge(gpio: Gpio) -> Score {
    (gpio / 50) as Score
}
