//! TOML profile parsing
//!
//! Board profile layout:
//!
//! ```toml
//! id = "esp32c3"
//! name = "ESP32-C3 DevKitM-1"
//!
//! [gpio_range]
//! min = 0
//! max = 21
//!
//! [strapping_pins]
//! pins = [2, 8, 9]
//!
//! [reserved_or_special]
//! usb_serial_jtag = [18, 19]
//!
//! [recommendations.spi_recommended]
//! SCLK = [6]
//!
//! [pin_risk_rules]
//! prefer_free_pins_first = [4, 5, 6, 7]
//! ```
//!
//! Every table except `gpio_range` is optional.

use log::debug;
use pinpilot_core::{BoardProfile, PeripheralProfile};

use crate::error::ProfileError;
use crate::intent::HardwareIntent;

/// Parse a board profile
pub fn parse_board(input: &str) -> Result<BoardProfile, ProfileError> {
    let board: BoardProfile = toml::from_str(input)?;

    if !board.gpio_range.is_valid() {
        return Err(ProfileError::InvalidGpioRange {
            id: board.id,
            min: board.gpio_range.min,
            max: board.gpio_range.max,
        });
    }

    debug!(
        "board {}: GPIO{}..=GPIO{}, {} strapping, {} USB reserved",
        board.id,
        board.gpio_range.min,
        board.gpio_range.max,
        board.strapping_pins.pins.len(),
        board.reserved.usb_serial_jtag.len()
    );
    Ok(board)
}

/// Parse a peripheral profile
pub fn parse_peripheral(input: &str) -> Result<PeripheralProfile, ProfileError> {
    let peripheral: PeripheralProfile = toml::from_str(input)?;
    debug!(
        "peripheral {}: {} pins, {} required",
        peripheral.id,
        peripheral.pins.len(),
        peripheral.required_pins().count()
    );
    Ok(peripheral)
}

/// Parse a hardware intent
pub fn parse_intent(input: &str) -> Result<HardwareIntent, ProfileError> {
    Ok(toml::from_str(input)?)
}
