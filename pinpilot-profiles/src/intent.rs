//! Hardware intent
//!
//! What a user asks for: a board, the peripherals to wire to it and the
//! allocation policy. Power and connectivity are carried through for the
//! firmware side and do not affect allocation.

use pinpilot_core::AllocationOptions;
use serde::{Deserialize, Serialize};

/// Default device name when the intent gives none
pub const DEFAULT_DEVICE_NAME: &str = "pinpilot_device";

/// Default battery nominal voltage
pub const DEFAULT_VOLTAGE: f32 = 3.7;

fn default_device_name() -> String {
    DEFAULT_DEVICE_NAME.into()
}

fn default_voltage() -> f32 {
    DEFAULT_VOLTAGE
}

fn default_true() -> bool {
    true
}

fn default_protocol() -> Option<AppProtocol> {
    Some(AppProtocol::Mqtt)
}

/// Power source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerSource {
    Battery,
    Usb,
    External,
}

/// Power configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerConfig {
    pub source: PowerSource,
    /// Battery nominal voltage
    #[serde(default = "default_voltage")]
    pub voltage: f32,
    #[serde(default = "default_true")]
    pub deep_sleep_required: bool,
}

/// Radio link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Wifi,
    Ble,
    Lora,
}

/// Application protocol over the link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppProtocol {
    Mqtt,
    Http,
    Websocket,
}

/// Connectivity configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectivityConfig {
    #[serde(rename = "type")]
    pub link: LinkType,
    #[serde(default = "default_protocol")]
    pub protocol: Option<AppProtocol>,
}

/// One requested peripheral
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeripheralRequest {
    /// Peripheral profile id
    pub id: String,
    /// Instance name, needed when the same profile is used twice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl PeripheralRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            alias: None,
        }
    }

    /// Name used to namespace this instance's assignment keys
    pub fn instance_id(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.id)
    }
}

/// Hardware intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareIntent {
    #[serde(default = "default_device_name")]
    pub device_name: String,
    /// Board profile id
    pub board: String,
    pub peripherals: Vec<PeripheralRequest>,
    pub power: PowerConfig,
    pub connectivity: ConnectivityConfig,
    #[serde(default = "default_true")]
    pub reserve_usb_serial_jtag: bool,
    #[serde(default = "default_true")]
    pub strict_avoid_boot_pins: bool,
}

impl HardwareIntent {
    /// Allocation policy requested by this intent
    pub fn options(&self) -> AllocationOptions {
        AllocationOptions {
            reserve_usb_serial_jtag: self.reserve_usb_serial_jtag,
            strict_avoid_boot_pins: self.strict_avoid_boot_pins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_id() {
        let plain = PeripheralRequest::new("ws2812");
        assert_eq!(plain.instance_id(), "ws2812");

        let aliased = PeripheralRequest {
            id: "ws2812".into(),
            alias: Some("status_led".into()),
        };
        assert_eq!(aliased.instance_id(), "status_led");
    }
}
