//! Pinmap artifact
//!
//! The persisted form of an allocation: the device name plus the full
//! allocation result, written as TOML.

use pinpilot_core::AllocationResult;
use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// Pinmap artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinmapArtifact {
    pub device_name: String,
    pub pinmap: AllocationResult,
}

impl PinmapArtifact {
    pub fn new(device_name: impl Into<String>, pinmap: AllocationResult) -> Self {
        Self {
            device_name: device_name.into(),
            pinmap,
        }
    }
}

/// Render a pinmap artifact as TOML
pub fn render_pinmap(artifact: &PinmapArtifact) -> Result<String, ProfileError> {
    Ok(toml::to_string_pretty(artifact)?)
}

/// Read a pinmap artifact back
pub fn parse_pinmap(input: &str) -> Result<PinmapArtifact, ProfileError> {
    Ok(toml::from_str(input)?)
}
