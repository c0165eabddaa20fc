//! Peripheral profile types

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One pin a peripheral exposes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinDescriptor {
    /// Logical role (e.g. "CS", "DIN")
    ///
    /// Optional so a profile missing the field still loads; the requirement
    /// extractor rejects required pins without one.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub role: Option<String>,
    /// Pin must be wired for the peripheral to work
    #[cfg_attr(feature = "serde", serde(default))]
    pub required: bool,
    /// Position on a serial bus (e.g. "spi_sclk")
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub bus_role: Option<String>,
}

impl PinDescriptor {
    /// Create a required pin
    pub fn required(role: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            required: true,
            bus_role: None,
        }
    }

    /// Create an optional pin
    pub fn optional(role: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            required: false,
            bus_role: None,
        }
    }

    /// Tag the pin with a bus position
    pub fn on_bus(mut self, bus_role: impl Into<String>) -> Self {
        self.bus_role = Some(bus_role.into());
        self
    }
}

/// Peripheral profile
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PeripheralProfile {
    /// Profile identifier, used to namespace assignment keys
    pub id: String,
    /// Human-readable name
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "String::is_empty"))]
    pub name: String,
    /// Pins in datasheet order
    #[cfg_attr(feature = "serde", serde(default))]
    pub pins: Vec<PinDescriptor>,
}

impl PeripheralProfile {
    /// Create a peripheral with no pins
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            pins: Vec::new(),
        }
    }

    /// Set the human-readable name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Append a pin
    pub fn with_pin(mut self, pin: PinDescriptor) -> Self {
        self.pins.push(pin);
        self
    }

    /// Iterate required pins, in declaration order
    pub fn required_pins(&self) -> impl Iterator<Item = &PinDescriptor> + '_ {
        self.pins.iter().filter(|p| p.required)
    }
}
