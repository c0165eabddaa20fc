//! Bus role parsing
//!
//! A bus role tags a pin with its position on a serial bus, written as
//! `<protocol>_<signal>` (e.g. `spi_sclk`, `i2c_sda`, `uart_tx`).

use alloc::string::String;

/// Serial bus protocols that carry board recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusProtocol {
    Spi,
    I2c,
    Uart,
}

impl BusProtocol {
    /// All protocols, in recommendation table order
    pub const ALL: [BusProtocol; 3] = [BusProtocol::Spi, BusProtocol::I2c, BusProtocol::Uart];

    /// Bus role prefix selecting this protocol (including the underscore)
    pub const fn prefix(self) -> &'static str {
        match self {
            BusProtocol::Spi => "spi_",
            BusProtocol::I2c => "i2c_",
            BusProtocol::Uart => "uart_",
        }
    }
}

/// A bus role split into protocol and signal
///
/// The signal is upper-cased so it matches the keys of the board's
/// recommendation tables (`spi_sclk` -> `SCLK`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusRole {
    pub protocol: BusProtocol,
    pub signal: String,
}

impl BusRole {
    /// Parse a bus role string
    ///
    /// Returns `None` when the prefix names no known protocol. Such roles
    /// still count as bus pins for ordering, they just never match a
    /// recommendation table.
    pub fn parse(bus_role: &str) -> Option<Self> {
        BusProtocol::ALL.iter().find_map(|&protocol| {
            bus_role
                .strip_prefix(protocol.prefix())
                .map(|signal| BusRole {
                    protocol,
                    signal: signal.to_uppercase(),
                })
        })
    }
}
