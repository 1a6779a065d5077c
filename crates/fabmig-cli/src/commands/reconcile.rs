//! Reconcile command
//!
//! Usage: fabmig reconcile [--snapshot-dir <DIR>] [--category <CATEGORY>]... [--dry-run]

use super::{run, GlobalArgs, SelectionArgs};
use clap::Args;
use fabmig_core::ReconcileOptions;
use fabmig_engine::commands::EngineCommand;

#[derive(Debug, Args)]
pub struct ReconcileArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Plan only; list the target but issue no create/update calls
    #[arg(long)]
    pub dry_run: bool,
}

pub fn execute(args: ReconcileArgs, global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cmd = EngineCommand::Reconcile {
        categories: args.selection.categories(),
        options: ReconcileOptions {
            dry_run: args.dry_run,
        },
    };
    run(cmd, &args.selection, global)
}
