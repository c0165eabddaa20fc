//! Profile loading and pinmap export
//!
//! Host-side collaborator of `pinpilot-core`:
//!
//! - TOML board, peripheral and hardware intent parsing
//! - A profile catalog with existence checks
//! - Intent resolution and allocation
//! - Pinmap artifact rendering
//!
//! Loads data the way a service would, from a directory of profile files:
//!
//! ```text
//! data/
//! ├── boards/esp32c3.toml
//! └── peripherals/
//!     ├── bme280_i2c.toml
//!     └── epaper_spi_2p13.toml
//! ```

pub mod catalog;
pub mod error;
pub mod intent;
pub mod parse;
pub mod pinmap;

pub use catalog::{generate_pinmap, ProfileCatalog, ResolvedIntent};
pub use error::ProfileError;
pub use intent::{
    AppProtocol, ConnectivityConfig, HardwareIntent, LinkType, PeripheralRequest, PowerConfig,
    PowerSource,
};
pub use parse::{parse_board, parse_intent, parse_peripheral};
pub use pinmap::{parse_pinmap, render_pinmap, PinmapArtifact};
