//! fabmig store - on-disk snapshots of fetched inventories
//!
//! One `{category}.json` file per category, holding the JSON array of
//! records exactly as fetched. This is the interchange format between the
//! fetch phase and the reconcile phase.

pub mod errors;
pub mod snapshot;

pub use errors::Result;
pub use snapshot::SnapshotStore;
