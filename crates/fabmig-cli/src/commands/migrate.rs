//! Migrate command: fetch, then reconcile
//!
//! Usage: fabmig migrate [--snapshot-dir <DIR>] [--category <CATEGORY>]... [--dry-run]

use super::{run, GlobalArgs, SelectionArgs};
use clap::Args;
use fabmig_core::ReconcileOptions;
use fabmig_engine::commands::EngineCommand;

#[derive(Debug, Args)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Fetch for real but only plan the reconcile phase
    #[arg(long)]
    pub dry_run: bool,
}

pub fn execute(args: MigrateArgs, global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cmd = EngineCommand::Migrate {
        categories: args.selection.categories(),
        options: ReconcileOptions {
            dry_run: args.dry_run,
        },
    };
    run(cmd, &args.selection, global)
}
