//! Reconcile phase: snapshot files -> target workspace

use crate::summary::{CategoryOutcome, Phase, RunSummary};
use fabmig_core::{log_op_end, log_op_error, log_op_start};
use fabmig_core::{reconcile_category, ObjectCategory, ReconcileOptions, TargetMutator};
use fabmig_store::SnapshotStore;
use std::time::Instant;
use tracing::info;

/// Reconcile every category of `categories` that has a snapshot
///
/// A category without a snapshot is skipped; an unreadable snapshot or a
/// failed target listing is recorded and the next category continues.
pub fn reconcile_snapshots(
    target: &dyn TargetMutator,
    store: &SnapshotStore,
    categories: &[ObjectCategory],
    options: ReconcileOptions,
    summary: &mut RunSummary,
) {
    for &category in categories {
        let outcome = reconcile_one(target, store, category, options);
        summary.record(category, Phase::Reconcile, outcome);
    }
}

fn reconcile_one(
    target: &dyn TargetMutator,
    store: &SnapshotStore,
    category: ObjectCategory,
    options: ReconcileOptions,
) -> CategoryOutcome {
    log_op_start!(
        "reconcile_category",
        category = category.as_str(),
        dry_run = options.dry_run
    );
    let start = Instant::now();

    let source = match store.load(category) {
        Ok(Some(inventory)) => inventory,
        Ok(None) => {
            info!(
                category = category.as_str(),
                path = %store.path_for(category).display(),
                "no snapshot, skipping category"
            );
            log_op_end!(
                "reconcile_category",
                duration_ms = start.elapsed().as_millis() as u64,
                category = category.as_str(),
                skipped_category = true
            );
            return CategoryOutcome::NoSnapshot;
        }
        Err(err) => {
            log_op_error!(
                "reconcile_category",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                category = category.as_str()
            );
            return CategoryOutcome::Failed(err);
        }
    };

    match reconcile_category(category, &source, target, options) {
        Ok(report) => {
            log_op_end!(
                "reconcile_category",
                duration_ms = start.elapsed().as_millis() as u64,
                category = category.as_str(),
                created = report.created(),
                updated = report.updated(),
                skipped = report.skipped(),
                failed = report.failed()
            );
            CategoryOutcome::Reconciled(report)
        }
        Err(err) => {
            log_op_error!(
                "reconcile_category",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                category = category.as_str(),
                status = err.status()
            );
            CategoryOutcome::Failed(err)
        }
    }
}
