//! Atomic file replacement (temp file, then rename)

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, Result};
use std::fs;
use std::path::Path;

/// Replace `target_path` with `content` so readers never see a partial file
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create_snapshot_dir", parent, e))?;
    }

    let temp_path = target_path.with_extension("json.tmp");
    fs::write(&temp_path, content).map_err(|e| io_error("write_snapshot_temp", &temp_path, e))?;
    fs::rename(&temp_path, target_path)
        .map_err(|e| io_error("rename_snapshot_temp", target_path, e))?;

    Ok(())
}
