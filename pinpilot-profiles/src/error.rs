//! Profile loading errors

use std::path::PathBuf;

use pinpilot_core::{AllocationError, Gpio};
use thiserror::Error;

/// Errors raised while loading profiles, resolving intents or exporting
/// pinmaps
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to render TOML: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("{}: {source}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<ProfileError>,
    },

    #[error("board {id} has an empty gpio range ({min}..={max})")]
    InvalidGpioRange { id: String, min: Gpio, max: Gpio },

    #[error("profile id {id} does not match its file name {}", path.display())]
    IdMismatch { path: PathBuf, id: String },

    #[error("Unknown board: {0}")]
    UnknownBoard(String),

    #[error("Unknown peripheral: {0}")]
    UnknownPeripheral(String),

    #[error("peripheral instance {0} requested twice; give one an alias")]
    DuplicatePeripheral(String),

    #[error("Pin mapping failed: {0}")]
    Allocation(#[from] AllocationError),
}

impl ProfileError {
    /// Attach the file a profile came from
    pub(crate) fn in_file(self, path: impl Into<PathBuf>) -> Self {
        ProfileError::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
