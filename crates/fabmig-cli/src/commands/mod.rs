//! Subcommands and the wiring they share

use clap::Args;
use fabmig_core::ObjectCategory;
use fabmig_engine::commands::{apply_engine_command, select_categories, EngineCommand};
use fabmig_engine::session::RestSessions;
use fabmig_engine::MigrationConfig;
use fabmig_rest::ClientCredentialProvider;
use fabmig_store::SnapshotStore;
use std::path::PathBuf;

pub mod fetch;
pub mod migrate;
pub mod reconcile;

/// Flags accepted before or after the subcommand
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SelectionArgs {
    /// Snapshot directory (default: SNAPSHOT_DIR, then ./snapshots)
    #[arg(long, value_name = "DIR")]
    pub snapshot_dir: Option<PathBuf>,

    /// Restrict the run to a category; repeatable (default: all)
    #[arg(long = "category", value_name = "CATEGORY")]
    pub categories: Vec<ObjectCategory>,
}

impl SelectionArgs {
    pub fn categories(&self) -> Vec<ObjectCategory> {
        select_categories(&self.categories)
    }
}

/// Load configuration, open sessions, run `cmd` and print the summary
///
/// Configuration and credential failures are returned; everything else is
/// reported in the summary and leaves the exit status at 0.
pub fn run(
    cmd: EngineCommand,
    selection: &SelectionArgs,
    global: &GlobalArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = MigrationConfig::load(global.config.as_deref())?;
    let snapshot_dir = selection
        .snapshot_dir
        .clone()
        .unwrap_or_else(|| config.snapshot_dir.clone());
    let store = SnapshotStore::new(snapshot_dir);

    let credentials = ClientCredentialProvider::new();
    let sessions = RestSessions::new(&config, &credentials);

    let summary = apply_engine_command(cmd, &sessions, &store)?;
    println!("{}", summary);
    Ok(())
}
