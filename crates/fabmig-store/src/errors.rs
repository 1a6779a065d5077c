//! Store-specific constructors for `ExError`

use fabmig_core::errors::{ExError, ExErrorKind};
use fabmig_core::ObjectCategory;
use std::path::Path;

pub type Result<T> = std::result::Result<T, ExError>;

/// Filesystem failure while reading or writing a snapshot
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(format!("{}: {}", path.display(), err))
}

/// Snapshot file exists but is not a JSON array
pub fn invalid_snapshot(category: ObjectCategory, path: &Path, reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidSnapshot)
        .with_op("load_snapshot")
        .with_category(category.as_str())
        .with_message(format!("{}: {}", path.display(), reason))
}
