// src/main.rs
// =============================================================================
// This is the entry point of the `rb` CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, always on stderr so stdout stays clean JSON)
// 3. Dispatch to the command handlers
// 4. Turn any error into a message and an exit code
//    (0 = success, 1 = external failure, 2 = bad input or configuration)
//
// This is the only place errors are printed. Everything below returns
// `error::Result` and uses `?` to pass failures up.
// =============================================================================

mod cli; // src/cli.rs - command-line parsing
mod commands; // src/commands/ - one handler per command
mod error; // src/error.rs - error taxonomy and exit codes
mod links; // src/links/ - link extraction, resolution and import
mod repo; // src/repo/ - cloning and README lookup
mod store; // src/store/ - Datasette API client

use clap::Parser;
use cli::Cli;
use error::{RbError, Result};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<()> {
    init_tracing(&cli.log_level)?;
    commands::run(cli.command).await
}

// Installs the stderr log subscriber
//
// Parameters:
//   filter: an EnvFilter directive such as "warn" or "repo_bench=debug"
fn init_tracing(filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(filter)
        .map_err(|e| RbError::InvalidConfig(format!("log level {:?}: {}", filter, e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
