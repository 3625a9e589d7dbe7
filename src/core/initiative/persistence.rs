//! JSON persistence for encounter snapshots.
//!
//! Restoring validates the snapshot, so a hand-edited or truncated file
//! surfaces as an error instead of a tracker with a broken turn order.

use std::fs;
use std::path::Path;

use super::snapshot::{EncounterSnapshot, InvariantViolation};

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid encounter: {0}")]
    Invalid(#[from] InvariantViolation),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

pub fn to_json(encounter: &EncounterSnapshot) -> Result<String> {
    Ok(serde_json::to_string(encounter)?)
}

pub fn to_json_pretty(encounter: &EncounterSnapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(encounter)?)
}

/// Parse and validate a snapshot.
pub fn from_json(json: &str) -> Result<EncounterSnapshot> {
    let encounter: EncounterSnapshot = serde_json::from_str(json)?;
    encounter.check_invariants()?;
    Ok(encounter)
}

/// Write the snapshot, creating parent directories as needed.
pub fn save_to_path(encounter: &EncounterSnapshot, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_json_pretty(encounter)?)?;
    log::debug!("Saved encounter to {}", path.display());
    Ok(())
}

/// Load a snapshot, returning an empty encounter when the file does not exist.
pub fn load_from_path(path: &Path) -> Result<EncounterSnapshot> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let encounter = from_json(&contents)?;
            log::debug!(
                "Loaded encounter with {} creature(s) from {}",
                encounter.len(),
                path.display()
            );
            Ok(encounter)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No encounter at {}, starting empty", path.display());
            Ok(EncounterSnapshot::new())
        }
        Err(e) => Err(e.into()),
    }
}
