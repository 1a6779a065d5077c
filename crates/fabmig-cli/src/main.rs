//! fabmig CLI
//!
//! Copies workspace artifacts from a source workspace to a target workspace

use clap::{Parser, Subcommand};
use fabmig_core::logging_facility::{init, Profile};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "fabmig")]
#[command(about = "fabmig - migrate workspace artifacts between tenants", long_about = None)]
struct Cli {
    /// Configuration file, layered under environment variables
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Emit JSON log lines instead of human-readable output
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the source workspace into snapshot files
    Fetch(commands::fetch::FetchArgs),
    /// Create or update target objects from snapshot files
    Reconcile(commands::reconcile::ReconcileArgs),
    /// Fetch, then reconcile
    Migrate(commands::migrate::MigrateArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let global = commands::GlobalArgs { config: cli.config };
    let result = match cli.command {
        Commands::Fetch(args) => commands::fetch::execute(args, &global),
        Commands::Reconcile(args) => commands::reconcile::execute(args, &global),
        Commands::Migrate(args) => commands::migrate::execute(args, &global),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
