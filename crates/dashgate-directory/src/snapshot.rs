//! JSON snapshots of the directory on disk
//!
//! A snapshot directory holds three files, each a JSON array of records:
//!
//! - `users.json` (required)
//! - `dashboards.json` (required)
//! - `folders.json` (optional, missing means no folders)
//!
//! An empty file reads as an empty array. A top-level object instead of an
//! array is accepted as a single record.

use dashgate_core::{Dashboard, DashgateError, Folder, Result, User};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// File holding user records
pub const USERS_FILE: &str = "users.json";
/// File holding dashboard records
pub const DASHBOARDS_FILE: &str = "dashboards.json";
/// File holding folder records
pub const FOLDERS_FILE: &str = "folders.json";

/// Every record of a directory, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// User records
    pub users: Vec<User>,
    /// Dashboard records
    pub dashboards: Vec<Dashboard>,
    /// Folder records
    pub folders: Vec<Folder>,
}

impl Snapshot {
    /// Load the snapshot stored under `dir`
    pub fn load_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(DashgateError::not_found(format!(
                "snapshot directory {} does not exist",
                dir.display()
            )));
        }

        let snapshot = Self {
            users: read_records(&dir.join(USERS_FILE), true)?,
            dashboards: read_records(&dir.join(DASHBOARDS_FILE), true)?,
            folders: read_records(&dir.join(FOLDERS_FILE), false)?,
        };

        tracing::info!(
            dir = %dir.display(),
            users = snapshot.users.len(),
            dashboards = snapshot.dashboards.len(),
            folders = snapshot.folders.len(),
            "loaded directory snapshot"
        );
        Ok(snapshot)
    }

    /// Write the snapshot as pretty-printed JSON files under `dir`
    pub fn save_dir(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        write_records(&dir.join(USERS_FILE), &self.users)?;
        write_records(&dir.join(DASHBOARDS_FILE), &self.dashboards)?;
        write_records(&dir.join(FOLDERS_FILE), &self.folders)?;
        tracing::info!(dir = %dir.display(), "saved directory snapshot");
        Ok(())
    }
}

fn read_records<T: DeserializeOwned>(path: &Path, required: bool) -> Result<Vec<T>> {
    if !path.exists() {
        if required {
            return Err(DashgateError::not_found(format!(
                "{} does not exist",
                path.display()
            )));
        }
        tracing::debug!(path = %path.display(), "optional snapshot file missing, using no records");
        return Ok(Vec::new());
    }

    let contents = std::fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(&contents).map_err(|e| parse_error(path, &e))?;
    let values = match value {
        Value::Array(values) => values,
        Value::Null => Vec::new(),
        single => {
            tracing::warn!(path = %path.display(), "expected a JSON array, reading a single record");
            vec![single]
        }
    };

    values
        .into_iter()
        .map(|value| serde_json::from_value(value).map_err(|e| parse_error(path, &e)))
        .collect()
}

fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}

fn parse_error(path: &Path, error: &serde_json::Error) -> DashgateError {
    DashgateError::serialization(format!("{}: {}", path.display(), error))
}
