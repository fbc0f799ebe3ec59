//! Durable storage for the reminder record

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::StorageError;
use crate::state::reminder_state::{ReminderState, SCHEMA_VERSION};

/// Loads and saves the [`ReminderState`] record at a fixed path.
///
/// Loading never fails: a missing or unreadable file is a first run, a
/// corrupt one is logged and replaced by defaults on the next save. Saves
/// go through a temp file and an atomic rename so a crash mid-write can
/// never leave a half-written record behind.
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted record, falling back to defaults.
    pub fn load(&self) -> ReminderState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No state file at {}, starting fresh", self.path.display());
                return ReminderState::default();
            }
            Err(e) => {
                warn!("Could not read state file {}: {}", self.path.display(), e);
                return ReminderState::default();
            }
        };

        match serde_json::from_str::<ReminderState>(&raw) {
            Ok(state) if state.schema_version > SCHEMA_VERSION => {
                warn!(
                    "State file {} has schema v{} from a newer release, starting fresh",
                    self.path.display(),
                    state.schema_version
                );
                ReminderState::default()
            }
            Ok(state) => state,
            Err(e) => {
                warn!(
                    "State file {} is corrupt, treating as first run: {}",
                    self.path.display(),
                    e
                );
                ReminderState::default()
            }
        }
    }

    /// Persist the record atomically (write temp file, fsync, rename).
    pub fn save(&self, state: &ReminderState) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(state)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut file = File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}
