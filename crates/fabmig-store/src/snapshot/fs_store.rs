#![allow(clippy::result_large_err)]

use crate::errors::{invalid_snapshot, io_error, Result};
use crate::snapshot::atomic::atomic_write;
use fabmig_core::{Inventory, ObjectCategory};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory of category snapshots
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, category: ObjectCategory) -> PathBuf {
        self.root.join(category.snapshot_file_name())
    }

    /// Write `inventory` as the snapshot of `category`, replacing any previous one
    pub fn save(&self, category: ObjectCategory, inventory: &Inventory) -> Result<PathBuf> {
        let path = self.path_for(category);
        let mut bytes = serde_json::to_vec_pretty(inventory)?;
        bytes.push(b'\n');
        atomic_write(&path, &bytes)?;

        tracing::debug!(
            category = category.as_str(),
            entries = inventory.len(),
            path = %path.display(),
            "snapshot saved"
        );
        Ok(path)
    }

    /// Load the snapshot of `category`
    ///
    /// Returns `Ok(None)` when no snapshot file exists.
    pub fn load(&self, category: ObjectCategory) -> Result<Option<Inventory>> {
        let path = self.path_for(category);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("read_snapshot", &path, e)),
        };

        let document: Value = serde_json::from_slice(&bytes)
            .map_err(|e| invalid_snapshot(category, &path, &e.to_string()))?;
        match document {
            Value::Array(entries) => {
                tracing::debug!(
                    category = category.as_str(),
                    entries = entries.len(),
                    "snapshot loaded"
                );
                Ok(Some(Inventory::from(entries)))
            }
            _ => Err(invalid_snapshot(category, &path, "expected a JSON array")),
        }
    }
}
