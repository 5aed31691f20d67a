// nl2sql/src/main.rs

mod cli;
mod commands;
mod http;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug nl2sql serve ... pour voir les détails
    // Logs go to stderr so `ask` and `check` output stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        // --- USE CASE: HTTP GATEWAY ---
        Commands::Serve { config } => commands::serve::execute(config).await?,

        // --- USE CASE: ONE-SHOT QUESTION ---
        Commands::Ask { question, config } => {
            if let Err(e) = commands::ask::execute(question, config).await {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        }

        // --- USE CASE: OFFLINE SAFETY CHECK ---
        Commands::Check { sql, config } => {
            if !commands::check::execute(sql, config)? {
                // Exit with error code for CI/CD
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
