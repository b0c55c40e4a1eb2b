//! oddb CLI - Command-line interface
//!
//! Runs subject searches, metadata and image lookups against an Open Douban
//! API server and prints the results as JSON.

mod commands;

use clap::Parser;
use oddb_core::OddbError;
use oddb_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "oddb")]
#[command(about = "Open Douban metadata and image lookup")]
struct Cli {
    /// Console log level, overridden by RUST_LOG
    #[arg(long, value_enum, default_value_t = CliLogLevel::Warn, global = true)]
    log_level: CliLogLevel,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.log_level.as_tracing_level(), None)
        .map_err(|e| OddbError::Logging {
            reason: e.to_string(),
        })
    {
        eprintln!("{}", e.user_message());
    }

    commands::handle_command(cli.command).await
}
