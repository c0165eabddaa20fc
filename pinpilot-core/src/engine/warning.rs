//! Boot safety warnings
//!
//! Conditions worth a human look that never block allocation.

use core::fmt;

use super::requirement::AssignmentKey;
use crate::profile::Gpio;

/// A committed assignment that may affect boot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootWarning {
    /// Assignment landed on a strapping pin
    StrappingPin { key: AssignmentKey, gpio: Gpio },
}

impl fmt::Display for BootWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootWarning::StrappingPin { key, gpio } => write!(
                f,
                "{} mapped to strapping pin GPIO{}. \
                 Check boot/reset behavior and external pull resistors.",
                key, gpio
            ),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BootWarning {
    fn format(&self, f: defmt::Formatter) {
        match self {
            BootWarning::StrappingPin { key, gpio } => {
                defmt::write!(f, "{} mapped to strapping pin GPIO{}", key, gpio)
            }
        }
    }
}
