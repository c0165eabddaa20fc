//! Profile catalog
//!
//! Holds every known board and peripheral profile and turns a hardware
//! intent into the descriptors the allocation engine needs. Unknown ids
//! are reported here, before the engine ever runs.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use pinpilot_core::{AllocationError, AllocationOptions, AllocationResult, BoardProfile, PeripheralProfile};

use crate::error::ProfileError;
use crate::intent::HardwareIntent;
use crate::parse::{parse_board, parse_peripheral};

/// Subdirectory holding board profiles
pub const BOARDS_DIR: &str = "boards";

/// Subdirectory holding peripheral profiles
pub const PERIPHERALS_DIR: &str = "peripherals";

/// Known profiles, keyed by id
#[derive(Debug, Clone, Default)]
pub struct ProfileCatalog {
    boards: BTreeMap<String, BoardProfile>,
    peripherals: BTreeMap<String, PeripheralProfile>,
}

/// Descriptors for one allocation, owned so the caller can hand them to
/// the engine without holding on to the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIntent {
    pub board: BoardProfile,
    /// Peripherals in request order, ids replaced by instance ids
    pub peripherals: Vec<PeripheralProfile>,
    pub options: AllocationOptions,
}

impl ResolvedIntent {
    /// Run the allocation engine
    pub fn allocate(&self) -> Result<AllocationResult, AllocationError> {
        pinpilot_core::allocate(&self.board, &self.peripherals, self.options)
    }
}

impl ProfileCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.toml` profile under `root/boards` and
    /// `root/peripherals`
    ///
    /// A profile's file stem must equal its `id`, so lookups by file name
    /// and the assignment key namespace agree. A missing subdirectory
    /// yields no profiles of that kind.
    pub fn load_dir(root: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let root = root.as_ref();
        let mut catalog = Self::new();

        for path in toml_files(&root.join(BOARDS_DIR))? {
            let board = read_profile(&path, parse_board)?;
            check_stem(&path, &board.id)?;
            catalog.insert_board(board);
        }

        for path in toml_files(&root.join(PERIPHERALS_DIR))? {
            let peripheral = read_profile(&path, parse_peripheral)?;
            check_stem(&path, &peripheral.id)?;
            catalog.insert_peripheral(peripheral);
        }

        info!(
            "Loaded {} board and {} peripheral profiles from {}",
            catalog.boards.len(),
            catalog.peripherals.len(),
            root.display()
        );
        Ok(catalog)
    }

    /// Add a board, keyed by its id
    pub fn insert_board(&mut self, board: BoardProfile) -> Option<BoardProfile> {
        self.boards.insert(board.id.clone(), board)
    }

    /// Add a peripheral, keyed by its id
    pub fn insert_peripheral(&mut self, peripheral: PeripheralProfile) -> Option<PeripheralProfile> {
        self.peripherals.insert(peripheral.id.clone(), peripheral)
    }

    /// Board ids, sorted
    pub fn board_ids(&self) -> Vec<&str> {
        self.boards.keys().map(String::as_str).collect()
    }

    /// Peripheral ids, sorted
    pub fn peripheral_ids(&self) -> Vec<&str> {
        self.peripherals.keys().map(String::as_str).collect()
    }

    /// Look up a board
    pub fn board(&self, id: &str) -> Result<&BoardProfile, ProfileError> {
        self.boards
            .get(id)
            .ok_or_else(|| ProfileError::UnknownBoard(id.into()))
    }

    /// Look up a peripheral
    pub fn peripheral(&self, id: &str) -> Result<&PeripheralProfile, ProfileError> {
        self.peripherals
            .get(id)
            .ok_or_else(|| ProfileError::UnknownPeripheral(id.into()))
    }

    /// Resolve an intent into owned descriptors
    ///
    /// Checks the board and every peripheral exist. Aliased peripherals
    /// take their alias as id, so two instances of one profile get
    /// distinct assignment keys.
    pub fn resolve(&self, intent: &HardwareIntent) -> Result<ResolvedIntent, ProfileError> {
        let board = self.board(&intent.board)?.clone();

        let mut seen = BTreeSet::new();
        let mut peripherals = Vec::with_capacity(intent.peripherals.len());

        for request in &intent.peripherals {
            let mut peripheral = self.peripheral(&request.id)?.clone();
            let instance_id = request.instance_id();

            if !seen.insert(instance_id) {
                return Err(ProfileError::DuplicatePeripheral(instance_id.into()));
            }

            peripheral.id = instance_id.into();
            peripherals.push(peripheral);
        }

        debug!(
            "Resolved {} on {} with {} peripherals",
            intent.device_name,
            board.id,
            peripherals.len()
        );

        Ok(ResolvedIntent {
            board,
            peripherals,
            options: intent.options(),
        })
    }
}

/// Resolve an intent against a catalog and allocate its pins
pub fn generate_pinmap(
    catalog: &ProfileCatalog,
    intent: &HardwareIntent,
) -> Result<AllocationResult, ProfileError> {
    let resolved = catalog.resolve(intent)?;
    let result = resolved.allocate()?;

    info!(
        "Mapped {} pins for {} ({} warnings)",
        result.assignments.len(),
        intent.device_name,
        result.warnings.len()
    );
    Ok(result)
}

/// `*.toml` files in a directory, sorted; empty if the directory is missing
fn toml_files(dir: &Path) -> Result<Vec<PathBuf>, ProfileError> {
    if !dir.is_dir() {
        debug!("No profile directory at {}", dir.display());
        return Ok(Vec::new());
    }

    let io_err = |source| ProfileError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_profile<T>(
    path: &Path,
    parse: fn(&str) -> Result<T, ProfileError>,
) -> Result<T, ProfileError> {
    let input = fs::read_to_string(path).map_err(|source| ProfileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&input).map_err(|e| e.in_file(path))
}

fn check_stem(path: &Path, id: &str) -> Result<(), ProfileError> {
    if path.file_stem().is_some_and(|stem| stem == id) {
        Ok(())
    } else {
        Err(ProfileError::IdMismatch {
            path: path.to_path_buf(),
            id: id.into(),
        })
    }
}
