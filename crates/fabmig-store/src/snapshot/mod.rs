//! Per-category snapshot files
//!
//! - `{root}/{category}.json`, a pretty-printed JSON array
//! - Atomic replacement on save
//! - Load checks only that the document is an array; record-level problems
//!   are left to the reconciliation pass

mod atomic;
mod fs_store;

pub use fs_store::SnapshotStore;
