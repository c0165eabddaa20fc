//! Allocation result
//!
//! The output contract consumed by artifact writers and firmware
//! generators. Assembly only reshapes data; it never validates.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::allocator::{AllocationOptions, Commitments};
use super::requirement::AssignmentKey;
use crate::profile::{BoardProfile, Gpio, PeripheralProfile};

/// Result of one successful allocation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AllocationResult {
    pub board_id: String,
    pub board_name: String,
    /// Peripheral ids in request order
    pub peripherals: Vec<String>,
    /// `<peripheral>.<role>` -> gpio
    pub assignments: BTreeMap<AssignmentKey, Gpio>,
    /// `<peripheral>.<role>` -> `;`-joined reason tags
    pub rationale: BTreeMap<AssignmentKey, String>,
    /// Human readable boot safety warnings
    pub warnings: Vec<String>,
    /// Policy flags used
    pub options: AllocationOptions,
}

impl AllocationResult {
    pub(crate) fn assemble(
        board: &BoardProfile,
        peripherals: &[PeripheralProfile],
        commitments: Commitments,
        options: AllocationOptions,
    ) -> Self {
        Self {
            board_id: board.id.clone(),
            board_name: board.name.clone(),
            peripherals: peripherals.iter().map(|p| p.id.clone()).collect(),
            assignments: commitments.assignments,
            rationale: commitments.rationale,
            warnings: commitments.warnings,
            options,
        }
    }

    /// Gpio assigned to a key such as `"epaper.CS"`
    pub fn gpio_for(&self, key: &str) -> Option<Gpio> {
        self.assignments.get(key).copied()
    }

    /// All assigned gpios, ascending
    pub fn used_gpios(&self) -> BTreeSet<Gpio> {
        self.assignments.values().copied().collect()
    }

    /// Check if any warning was raised
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
