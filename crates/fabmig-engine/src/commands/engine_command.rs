//! Engine-level commands: one per CLI subcommand

#![allow(clippy::result_large_err)]

use crate::commands::fetch::fetch_categories;
use crate::commands::reconcile::reconcile_snapshots;
use crate::session::WorkspaceSessions;
use crate::summary::RunSummary;
use fabmig_core::errors::ExError;
use fabmig_core::{log_op_end, log_op_error, log_op_start};
use fabmig_core::{ObjectCategory, ReconcileOptions};
use fabmig_core_types::RunId;
use fabmig_store::SnapshotStore;
use std::time::Instant;

#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Source workspace -> snapshots
    Fetch { categories: Vec<ObjectCategory> },
    /// Snapshots -> target workspace
    Reconcile {
        categories: Vec<ObjectCategory>,
        options: ReconcileOptions,
    },
    /// Fetch, then reconcile the fresh snapshots
    Migrate {
        categories: Vec<ObjectCategory>,
        options: ReconcileOptions,
    },
}

impl EngineCommand {
    pub fn name(&self) -> &'static str {
        match self {
            EngineCommand::Fetch { .. } => "fetch",
            EngineCommand::Reconcile { .. } => "reconcile",
            EngineCommand::Migrate { .. } => "migrate",
        }
    }
}

/// Restrict the fixed processing order to `requested`; empty means all
pub fn select_categories(requested: &[ObjectCategory]) -> Vec<ObjectCategory> {
    ObjectCategory::ALL
        .into_iter()
        .filter(|c| requested.is_empty() || requested.contains(c))
        .collect()
}

/// Run one command to completion
///
/// Sessions are opened before any category is touched; `migrate` opens both
/// sides up front.
///
/// # Errors
///
/// Only fatal errors (credential exchange) are returned. Category and object
/// failures are recorded in the returned summary.
pub fn apply_engine_command(
    cmd: EngineCommand,
    sessions: &dyn WorkspaceSessions,
    store: &SnapshotStore,
) -> Result<RunSummary, ExError> {
    let run_id = RunId::new();
    let span = tracing::info_span!("run", run_id = %run_id, command = cmd.name());
    let _guard = span.enter();

    let op = cmd.name();
    log_op_start!(op, snapshot_dir = %store.root().display());
    let start = Instant::now();

    let result = apply_impl(cmd, sessions, store, RunSummary::new(run_id)).map_err(|e| {
        log_op_error!(op, e.clone(), duration_ms = start.elapsed().as_millis() as u64);
        e
    })?;

    log_op_end!(
        op,
        duration_ms = start.elapsed().as_millis() as u64,
        created = result.created(),
        updated = result.updated(),
        skipped = result.skipped(),
        failed = result.failed(),
        category_errors = result.category_errors().count()
    );
    Ok(result)
}

fn apply_impl(
    cmd: EngineCommand,
    sessions: &dyn WorkspaceSessions,
    store: &SnapshotStore,
    mut summary: RunSummary,
) -> Result<RunSummary, ExError> {
    match cmd {
        EngineCommand::Fetch { categories } => {
            let source = sessions.open_source()?;
            fetch_categories(source.as_ref(), store, &categories, &mut summary);
        }
        EngineCommand::Reconcile {
            categories,
            options,
        } => {
            let target = sessions.open_target()?;
            reconcile_snapshots(target.as_ref(), store, &categories, options, &mut summary);
        }
        EngineCommand::Migrate {
            categories,
            options,
        } => {
            let source = sessions.open_source()?;
            let target = sessions.open_target()?;
            fetch_categories(source.as_ref(), store, &categories, &mut summary);
            // a failed fetch must not fall back to an older snapshot
            let fetched = summary.fetched_categories();
            reconcile_snapshots(target.as_ref(), store, &fetched, options, &mut summary);
        }
    }
    Ok(summary)
}
