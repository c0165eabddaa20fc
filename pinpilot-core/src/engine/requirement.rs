//! Requirement extraction
//!
//! Flattens the required pins of every peripheral into one work list and
//! orders it so bus pins are placed first, then control lines, then
//! everything else.

use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::allocator::AllocationError;
use crate::profile::PeripheralProfile;

/// Control roles placed right after bus pins
pub const CONTROL_ROLES: [&str; 3] = ["CS", "DC", "RST"];

/// Allocation priority bucket, lowest value allocated first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Priority {
    /// Pin has a bus role
    Bus = 0,
    /// Chip select, data/command or reset line
    Control = 1,
    /// Anything else
    General = 2,
}

/// Namespaced assignment key, `<peripheral_id>.<role>`
///
/// Two peripherals may both need a "CS"; the peripheral prefix keeps their
/// keys apart.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AssignmentKey(String);

impl AssignmentKey {
    /// Build the key for a peripheral role
    pub fn new(peripheral_id: &str, role: &str) -> Self {
        let mut key = String::with_capacity(peripheral_id.len() + 1 + role.len());
        key.push_str(peripheral_id);
        key.push('.');
        key.push_str(role);
        Self(key)
    }

    /// Key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssignmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for AssignmentKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AssignmentKey {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.0.as_str());
    }
}

/// One required pin, borrowed from its peripheral profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinRequirement<'a> {
    pub peripheral_id: &'a str,
    pub role: &'a str,
    pub bus_role: Option<&'a str>,
}

impl<'a> PinRequirement<'a> {
    /// Allocation bucket for this requirement
    pub fn priority(&self) -> Priority {
        if self.bus_role.is_some() {
            Priority::Bus
        } else if CONTROL_ROLES.contains(&self.role) {
            Priority::Control
        } else {
            Priority::General
        }
    }

    /// Namespaced key for this requirement
    pub fn key(&self) -> AssignmentKey {
        AssignmentKey::new(self.peripheral_id, self.role)
    }
}

/// Flatten and order the required pins of all peripherals
///
/// The sort is stable, so within a bucket requirements keep peripheral
/// order and then pin order. Fails on the first required pin without a
/// role; optional pins are not inspected.
pub fn extract_requirements(
    peripherals: &[PeripheralProfile],
) -> Result<Vec<PinRequirement<'_>>, AllocationError> {
    let mut requirements = Vec::new();

    for peripheral in peripherals {
        for (pin_index, pin) in peripheral.pins.iter().enumerate() {
            if !pin.required {
                continue;
            }

            let role = match pin.role.as_deref() {
                Some(role) if !role.is_empty() => role,
                _ => {
                    return Err(AllocationError::MissingRoleField {
                        peripheral_id: peripheral.id.clone(),
                        pin_index,
                    })
                }
            };

            requirements.push(PinRequirement {
                peripheral_id: &peripheral.id,
                role,
                bus_role: pin.bus_role.as_deref().filter(|b| !b.is_empty()),
            });
        }
    }

    requirements.sort_by_key(PinRequirement::priority);
    Ok(requirements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::PinDescriptor;

    fn epaper() -> PeripheralProfile {
        PeripheralProfile::new("epaper")
            .with_pin(PinDescriptor::required("BUSY"))
            .with_pin(PinDescriptor::required("RST"))
            .with_pin(PinDescriptor::required("SCLK").on_bus("spi_sclk"))
            .with_pin(PinDescriptor::required("DC"))
            .with_pin(PinDescriptor::optional("MISO").on_bus("spi_miso"))
            .with_pin(PinDescriptor::required("MOSI").on_bus("spi_mosi"))
    }

    fn sensor() -> PeripheralProfile {
        PeripheralProfile::new("bme280")
            .with_pin(PinDescriptor::required("SDA").on_bus("i2c_sda"))
            .with_pin(PinDescriptor::required("INT"))
            .with_pin(PinDescriptor::required("CS"))
    }

    fn keys(requirements: &[PinRequirement<'_>]) -> Vec<String> {
        requirements
            .iter()
            .map(|r| String::from(r.key().as_str()))
            .collect()
    }

    #[test]
    fn test_assignment_key() {
        let key = AssignmentKey::new("epaper_spi_2p13", "CS");
        assert_eq!(key.as_str(), "epaper_spi_2p13.CS");
        assert_ne!(key, AssignmentKey::new("bme280", "CS"));
    }

    #[test]
    fn test_priority_buckets() {
        let req = |role, bus_role| PinRequirement {
            peripheral_id: "p",
            role,
            bus_role,
        };
        assert_eq!(req("CS", Some("spi_cs")).priority(), Priority::Bus);
        assert_eq!(req("CS", None).priority(), Priority::Control);
        assert_eq!(req("DC", None).priority(), Priority::Control);
        assert_eq!(req("RST", None).priority(), Priority::Control);
        assert_eq!(req("EN", None).priority(), Priority::General);
        assert_eq!(req("cs", None).priority(), Priority::General);
    }

    #[test]
    fn test_stable_bucket_order() {
        let peripherals = [epaper(), sensor()];
        let requirements = extract_requirements(&peripherals).unwrap();

        assert_eq!(
            keys(&requirements),
            [
                "epaper.SCLK",
                "epaper.MOSI",
                "bme280.SDA",
                "epaper.RST",
                "epaper.DC",
                "bme280.CS",
                "epaper.BUSY",
                "bme280.INT",
            ]
        );
    }

    #[test]
    fn test_optional_pins_skipped() {
        let peripherals = [epaper()];
        let requirements = extract_requirements(&peripherals).unwrap();
        assert!(requirements.iter().all(|r| r.role != "MISO"));
        assert_eq!(requirements.len(), 5);
    }

    #[test]
    fn test_missing_role_rejected() {
        let broken = PeripheralProfile::new("broken")
            .with_pin(PinDescriptor::required("A"))
            .with_pin(PinDescriptor {
                role: None,
                required: true,
                bus_role: None,
            });

        let err = extract_requirements(&[broken]).unwrap_err();
        assert_eq!(
            err,
            AllocationError::MissingRoleField {
                peripheral_id: String::from("broken"),
                pin_index: 1,
            }
        );
    }

    #[test]
    fn test_missing_role_on_optional_pin_ignored() {
        let peripheral = PeripheralProfile::new("led")
            .with_pin(PinDescriptor::required("DIN"))
            .with_pin(PinDescriptor::default());

        let peripherals = [peripheral];
        let requirements = extract_requirements(&peripherals).unwrap();
        assert_eq!(requirements.len(), 1);
    }

    #[test]
    fn test_empty_bus_role_is_not_a_bus_pin() {
        let peripherals = [PeripheralProfile::new("buzzer")
            .with_pin(PinDescriptor::required("X").on_bus(""))
            .with_pin(PinDescriptor::required("DC"))];
        let requirements = extract_requirements(&peripherals).unwrap();

        assert_eq!(keys(&requirements), ["buzzer.DC", "buzzer.X"]);
        assert_eq!(requirements[1].bus_role, None);
        assert_eq!(requirements[1].priority(), Priority::General);
    }
}
