//! Fetch command
//!
//! Usage: fabmig fetch [--snapshot-dir <DIR>] [--category <CATEGORY>]...

use super::{run, GlobalArgs, SelectionArgs};
use clap::Args;
use fabmig_engine::commands::EngineCommand;

#[derive(Debug, Args)]
pub struct FetchArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

pub fn execute(args: FetchArgs, global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cmd = EngineCommand::Fetch {
        categories: args.selection.categories(),
    };
    run(cmd, &args.selection, global)
}
