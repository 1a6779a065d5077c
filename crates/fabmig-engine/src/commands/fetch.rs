//! Fetch phase: source workspace -> snapshot files
//!
//! Each category is listed and written to its own snapshot file. A failing
//! category is recorded, its snapshot is replaced by an empty one, and the
//! remaining categories continue.

use crate::summary::{CategoryOutcome, Phase, RunSummary};
use fabmig_core::{log_op_end, log_op_error, log_op_start};
use fabmig_core::{Inventory, ObjectCategory, ObjectSource};
use fabmig_store::SnapshotStore;
use std::time::Instant;
use tracing::warn;

/// Fetch `categories` in order and record one outcome per category
pub fn fetch_categories(
    source: &dyn ObjectSource,
    store: &SnapshotStore,
    categories: &[ObjectCategory],
    summary: &mut RunSummary,
) {
    for &category in categories {
        let outcome = fetch_one(source, store, category);
        summary.record(category, Phase::Fetch, outcome);
    }
}

fn fetch_one(
    source: &dyn ObjectSource,
    store: &SnapshotStore,
    category: ObjectCategory,
) -> CategoryOutcome {
    log_op_start!("fetch_category", category = category.as_str());
    let start = Instant::now();

    let result = source
        .list_inventory(category)
        .and_then(|inventory| {
            let entries = inventory.len();
            store
                .save(category, &inventory)
                .map(|path| (entries, path))
        });

    match result {
        Ok((entries, path)) => {
            log_op_end!(
                "fetch_category",
                duration_ms = start.elapsed().as_millis() as u64,
                category = category.as_str(),
                entries = entries
            );
            CategoryOutcome::Fetched { entries, path }
        }
        Err(err) => {
            log_op_error!(
                "fetch_category",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                category = category.as_str(),
                status = err.status()
            );
            clear_snapshot(store, category);
            CategoryOutcome::Failed(err)
        }
    }
}

/// Replace the snapshot of a failed category with an empty inventory
///
/// A snapshot from an earlier run must not be reconciled as if it were current.
fn clear_snapshot(store: &SnapshotStore, category: ObjectCategory) {
    if let Err(err) = store.save(category, &Inventory::new()) {
        warn!(
            category = category.as_str(),
            error = %err,
            "could not clear snapshot of failed category"
        );
    }
}
