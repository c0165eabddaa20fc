//! Greedy pin allocator
//!
//! Walks the ordered requirement list once. For each requirement the best
//! ranked candidate is committed and removed from the pool. Earlier
//! commitments are never revisited, so a requirement can run out of pins
//! because of choices made before it; that aborts the whole allocation.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use log::{debug, trace, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ranker::Ranker;
use super::requirement::{extract_requirements, AssignmentKey};
use super::result::AllocationResult;
use super::warning::BootWarning;
use crate::profile::{BoardProfile, Gpio, PeripheralProfile};

/// Allocation policy flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AllocationOptions {
    /// Never hand out the board's USB serial/JTAG pins
    pub reserve_usb_serial_jtag: bool,
    /// Penalize strapping pins heavily for every role, not only sensitive ones
    pub strict_avoid_boot_pins: bool,
}

impl Default for AllocationOptions {
    fn default() -> Self {
        Self {
            reserve_usb_serial_jtag: true,
            strict_avoid_boot_pins: true,
        }
    }
}

/// Fatal allocation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// A required pin has no role
    MissingRoleField {
        peripheral_id: String,
        /// Index into the peripheral's pin list
        pin_index: usize,
    },
    /// No free gpio left for a requirement
    PinPoolExhausted { key: AssignmentKey },
}

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationError::MissingRoleField {
                peripheral_id,
                pin_index,
            } => write!(
                f,
                "Required pin {} of peripheral {} has no role",
                pin_index, peripheral_id
            ),
            AllocationError::PinPoolExhausted { key } => {
                write!(f, "No available GPIO pins left for {}", key)
            }
        }
    }
}

impl core::error::Error for AllocationError {}

#[cfg(feature = "defmt")]
impl defmt::Format for AllocationError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            AllocationError::MissingRoleField {
                peripheral_id,
                pin_index,
            } => defmt::write!(
                f,
                "MissingRoleField({}[{}])",
                peripheral_id.as_str(),
                pin_index
            ),
            AllocationError::PinPoolExhausted { key } => {
                defmt::write!(f, "PinPoolExhausted({})", key)
            }
        }
    }
}

/// Per-call allocation state
///
/// Created fresh by every [`Allocator::allocate`] call and consumed by the
/// result assembler.
#[derive(Debug, Default)]
pub(crate) struct Commitments {
    pub used: BTreeSet<Gpio>,
    pub assignments: BTreeMap<AssignmentKey, Gpio>,
    pub rationale: BTreeMap<AssignmentKey, String>,
    pub warnings: Vec<String>,
}

/// Allocator for one board
///
/// Borrows the board and a ranker; holds no state between calls, so one
/// allocator can serve any number of peripheral sets.
#[derive(Clone)]
pub struct Allocator<'a, 'r> {
    board: &'a BoardProfile,
    options: AllocationOptions,
    ranker: Ranker<'r>,
}

impl<'a> Allocator<'a, 'static> {
    /// Create an allocator with the default rule stack
    pub fn new(board: &'a BoardProfile, options: AllocationOptions) -> Self {
        Self::with_ranker(board, options, Ranker::default())
    }
}

impl<'a, 'r> Allocator<'a, 'r> {
    /// Create an allocator with a custom ranker
    pub fn with_ranker(board: &'a BoardProfile, options: AllocationOptions, ranker: Ranker<'r>) -> Self {
        Self {
            board,
            options,
            ranker,
        }
    }

    /// Policy flags in effect
    pub fn options(&self) -> AllocationOptions {
        self.options
    }

    /// Allocate pins for a set of peripherals
    ///
    /// Returns the full result, or the first fatal error. No partial
    /// assignments escape on failure.
    pub fn allocate(
        &self,
        peripherals: &[PeripheralProfile],
    ) -> Result<AllocationResult, AllocationError> {
        let requirements = extract_requirements(peripherals)?;
        let mut commitments = Commitments::default();

        for requirement in &requirements {
            let key = requirement.key();

            let candidates = self.ranker.rank(
                requirement.role,
                requirement.bus_role,
                self.board,
                &commitments.used,
                self.options,
            );
            trace!("{}: {} candidates", key, candidates.len());

            let Some(pick) = candidates.into_iter().next() else {
                warn!("No free GPIO for {}", key);
                return Err(AllocationError::PinPoolExhausted { key });
            };

            let reason = pick.reason();
            debug!("{} -> GPIO{} ({}, score {})", key, pick.gpio, reason, pick.score);

            if self.board.is_strapping(pick.gpio) {
                let warning = BootWarning::StrappingPin {
                    key: key.clone(),
                    gpio: pick.gpio,
                };
                warn!("{}", warning);
                commitments.warnings.push(warning.to_string());
            }

            commitments.used.insert(pick.gpio);
            commitments.rationale.insert(key.clone(), reason);
            commitments.assignments.insert(key, pick.gpio);
        }

        Ok(AllocationResult::assemble(
            self.board,
            peripherals,
            commitments,
            self.options,
        ))
    }
}

/// Allocate pins for `peripherals` on `board`
///
/// Convenience wrapper around [`Allocator`] with the default rule stack.
pub fn allocate(
    board: &BoardProfile,
    peripherals: &[PeripheralProfile],
    options: AllocationOptions,
) -> Result<AllocationResult, AllocationError> {
    Allocator::new(board, options).allocate(peripherals)
}
