//! Board profile types
//!
//! A board profile describes the GPIOs a microcontroller board exposes and
//! the metadata used to rank them: strapping pins, pins reserved for the
//! USB serial/JTAG bridge, per-bus recommendations and a list of generally
//! safe pins.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::vec::Vec;
use core::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::bus::{BusProtocol, BusRole};

/// GPIO index as printed on the datasheet
pub type Gpio = u8;

/// Inclusive range of GPIO indices exposed by a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GpioRange {
    pub min: Gpio,
    pub max: Gpio,
}

impl GpioRange {
    /// Create a new range
    pub const fn new(min: Gpio, max: Gpio) -> Self {
        Self { min, max }
    }

    /// Check if a gpio lies within the range
    pub const fn contains(&self, gpio: Gpio) -> bool {
        gpio >= self.min && gpio <= self.max
    }

    /// Check that `min <= max`
    pub const fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    /// Iterate every gpio in the range, ascending
    pub fn iter(&self) -> RangeInclusive<Gpio> {
        self.min..=self.max
    }
}

/// Pins whose level at reset selects the boot mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StrappingPins {
    #[cfg_attr(feature = "serde", serde(default))]
    pub pins: BTreeSet<Gpio>,
}

/// Pins with a dedicated function on the board
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReservedPins {
    /// Pins wired to the USB serial/JTAG bridge
    #[cfg_attr(feature = "serde", serde(default))]
    pub usb_serial_jtag: BTreeSet<Gpio>,
}

/// Recommended pins per bus protocol, keyed by upper-case signal name
///
/// For example `spi_recommended["SCLK"] = [6]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Recommendations {
    pub spi_recommended: BTreeMap<String, Vec<Gpio>>,
    pub i2c_recommended: BTreeMap<String, Vec<Gpio>>,
    pub uart_recommended: BTreeMap<String, Vec<Gpio>>,
}

impl Recommendations {
    /// Recommendation table for a protocol
    pub fn table(&self, protocol: BusProtocol) -> &BTreeMap<String, Vec<Gpio>> {
        match protocol {
            BusProtocol::Spi => &self.spi_recommended,
            BusProtocol::I2c => &self.i2c_recommended,
            BusProtocol::Uart => &self.uart_recommended,
        }
    }

    fn table_mut(&mut self, protocol: BusProtocol) -> &mut BTreeMap<String, Vec<Gpio>> {
        match protocol {
            BusProtocol::Spi => &mut self.spi_recommended,
            BusProtocol::I2c => &mut self.i2c_recommended,
            BusProtocol::Uart => &mut self.uart_recommended,
        }
    }

    /// Recommended pins for a raw bus role string (e.g. `spi_sclk`)
    ///
    /// Returns an empty slice for unknown protocols or signals.
    pub fn for_bus_role(&self, bus_role: &str) -> &[Gpio] {
        BusRole::parse(bus_role)
            .and_then(|role| self.table(role.protocol).get(&role.signal))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Generic pin risk guidance
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinRiskRules {
    /// Pins that are safe for general use, in order of preference
    #[cfg_attr(feature = "serde", serde(default))]
    pub prefer_free_pins_first: Vec<Gpio>,
}

/// Board profile
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardProfile {
    /// Profile identifier (e.g. "esp32c3")
    pub id: String,
    /// Human readable board name
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// GPIOs exposed by the board
    pub gpio_range: GpioRange,
    /// Boot strapping pins
    #[cfg_attr(feature = "serde", serde(default))]
    pub strapping_pins: StrappingPins,
    /// Reserved / special-function pins
    #[cfg_attr(feature = "serde", serde(default, rename = "reserved_or_special"))]
    pub reserved: ReservedPins,
    /// Per-bus pin recommendations
    #[cfg_attr(feature = "serde", serde(default))]
    pub recommendations: Recommendations,
    /// Pin risk guidance
    #[cfg_attr(feature = "serde", serde(default))]
    pub pin_risk_rules: PinRiskRules,
}

impl BoardProfile {
    /// Create a board with no strapping, reserved or recommended pins
    pub fn new(id: impl Into<String>, name: impl Into<String>, min: Gpio, max: Gpio) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gpio_range: GpioRange::new(min, max),
            strapping_pins: StrappingPins::default(),
            reserved: ReservedPins::default(),
            recommendations: Recommendations::default(),
            pin_risk_rules: PinRiskRules::default(),
        }
    }

    /// Add strapping pins
    pub fn with_strapping(mut self, pins: impl IntoIterator<Item = Gpio>) -> Self {
        self.strapping_pins.pins.extend(pins);
        self
    }

    /// Add pins reserved for USB serial/JTAG
    pub fn with_usb_serial_jtag(mut self, pins: impl IntoIterator<Item = Gpio>) -> Self {
        self.reserved.usb_serial_jtag.extend(pins);
        self
    }

    /// Add recommended pins for a bus signal (e.g. `Spi`, `"SCLK"`)
    pub fn with_recommendation(
        mut self,
        protocol: BusProtocol,
        signal: &str,
        pins: impl IntoIterator<Item = Gpio>,
    ) -> Self {
        self.recommendations
            .table_mut(protocol)
            .entry(signal.into())
            .or_default()
            .extend(pins);
        self
    }

    /// Append to the preferred free pin list
    pub fn with_preferred(mut self, pins: impl IntoIterator<Item = Gpio>) -> Self {
        self.pin_risk_rules.prefer_free_pins_first.extend(pins);
        self
    }

    /// Check if a gpio is a boot strapping pin
    pub fn is_strapping(&self, gpio: Gpio) -> bool {
        self.strapping_pins.pins.contains(&gpio)
    }

    /// Check if a gpio is reserved for USB serial/JTAG
    pub fn is_usb_reserved(&self, gpio: Gpio) -> bool {
        self.reserved.usb_serial_jtag.contains(&gpio)
    }

    /// Check if a gpio is on the preferred free pin list
    pub fn is_preferred(&self, gpio: Gpio) -> bool {
        self.pin_risk_rules.prefer_free_pins_first.contains(&gpio)
    }
}
