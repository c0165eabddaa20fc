//! Candidate ranking
//!
//! For one role, enumerates every free GPIO on the board, scores it with
//! the rule stack and returns the candidates best first.

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use heapless::Vec as HVec;

use super::allocator::AllocationOptions;
use super::rules::{
    tie_break_nudge, BusRecommendationRule, PreferredPinRule, RankContext, ReasonTag,
    ScoringRule, Score, StrappingPenaltyRule,
};
use crate::profile::{BoardProfile, Gpio};

/// Maximum rules in a ranker's stack
pub const MAX_RULES: usize = 4;

/// Rules applied by [`Ranker::default`], in order
static DEFAULT_RULES: [&dyn ScoringRule; 3] = [
    &PreferredPinRule,
    &BusRecommendationRule,
    &StrappingPenaltyRule,
];

/// A scored candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinPick {
    pub gpio: Gpio,
    /// Tags in rule order; at most one per rule
    pub reasons: HVec<ReasonTag, MAX_RULES>,
    pub score: Score,
}

impl PinPick {
    /// Tags joined with `;`
    pub fn reason(&self) -> String {
        let mut out = String::new();
        for (i, tag) in self.reasons.iter().enumerate() {
            if i > 0 {
                out.push(';');
            }
            // Writing into a String cannot fail
            let _ = write!(out, "{}", tag);
        }
        out
    }
}

/// Rule stack exceeds [`MAX_RULES`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RuleStackFull;

/// Candidate ranker
///
/// Holds an ordered stack of scoring rules. The default stack is preferred
/// pin bonus, bus recommendation bonus, strapping penalty.
#[derive(Clone)]
pub struct Ranker<'r> {
    rules: HVec<&'r dyn ScoringRule, MAX_RULES>,
}

impl Default for Ranker<'static> {
    fn default() -> Self {
        let mut rules = HVec::new();
        for rule in DEFAULT_RULES {
            // DEFAULT_RULES is shorter than MAX_RULES
            let _ = rules.push(rule);
        }
        Self { rules }
    }
}

impl<'r> Ranker<'r> {
    /// Create a ranker with a custom rule stack
    pub fn with_rules(rules: &[&'r dyn ScoringRule]) -> Result<Self, RuleStackFull> {
        let mut stack = HVec::new();
        stack.extend_from_slice(rules).map_err(|_| RuleStackFull)?;
        Ok(Self { rules: stack })
    }

    /// Number of rules in the stack
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Rank the free GPIOs for one role
    ///
    /// Skips pins in `used` and, when `reserve_usb_serial_jtag` is set, the
    /// board's USB serial/JTAG pins. Strapping pins are only penalized.
    /// Results are ordered by score descending, then gpio ascending. An
    /// empty list means the pool is exhausted.
    pub fn rank(
        &self,
        role: &str,
        bus_role: Option<&str>,
        board: &BoardProfile,
        used: &BTreeSet<Gpio>,
        options: AllocationOptions,
    ) -> Vec<PinPick> {
        let ctx = RankContext::new(role, bus_role, board, options.strict_avoid_boot_pins);

        let mut candidates: Vec<PinPick> = board
            .gpio_range
            .iter()
            .filter(|gpio| !used.contains(gpio))
            .filter(|&gpio| !(options.reserve_usb_serial_jtag && board.is_usb_reserved(gpio)))
            .map(|gpio| self.score(gpio, &ctx))
            .collect();

        candidates.sort_by(|a, b| b.score.cmp(&a.score).then(a.gpio.cmp(&b.gpio)));
        candidates
    }

    fn score(&self, gpio: Gpio, ctx: &RankContext<'_>) -> PinPick {
        let mut score = 0;
        let mut reasons = HVec::new();

        for rule in &self.rules {
            if let Some(contribution) = rule.score(gpio, ctx) {
                score += contribution.delta;
                // One tag per rule, so this fits
                let _ = reasons.push(contribution.tag);
            }
        }

        score -= tie_break_nudge(gpio);

        if reasons.is_empty() {
            let _ = reasons.push(ReasonTag::FallbackAvailablePin);
        }

        PinPick {
            gpio,
            reasons,
            score,
        }
    }
}
