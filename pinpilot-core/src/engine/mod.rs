//! Allocation engine
//!
//! Requirements flow through the engine in one forward pass:
//! extract and order them, rank the free GPIOs for each, commit the best
//! candidate, then assemble the result.

pub mod allocator;
pub mod ranker;
pub mod requirement;
pub mod result;
pub mod rules;
pub mod warning;

pub use allocator::{allocate, AllocationError, AllocationOptions, Allocator};
pub use ranker::{PinPick, Ranker, RuleStackFull, MAX_RULES};
pub use requirement::{extract_requirements, AssignmentKey, PinRequirement, Priority};
pub use result::AllocationResult;
pub use rules::{ReasonTag, RankContext, ScoringRule, Score};
pub use warning::BootWarning;
