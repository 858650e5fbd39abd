//! RxTxApp validation CLI
//!
//! Builds RxTxApp session configurations for the validation cases, runs
//! them for a bounded time and reports a pass/fail verdict per case.

use clap::Parser;
use rxtxapp::commands::Commands;
use rxtxapp::{cli, common::logging};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rxtxapp-validate", about = "RxTxApp session validation harness")]
#[command(version, long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.config/rxtxapp-validation/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More detailed output and debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Runs also log to a file; the guard flushes it on exit
    let _log_guard = match cli.command {
        Commands::Run { .. } => logging::init_with_file(cli.verbose),
        _ => {
            logging::init_cli(cli.verbose);
            None
        }
    };

    if let Err(e) = cli::dispatch(cli.command, cli.config.as_deref(), cli.verbose).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
