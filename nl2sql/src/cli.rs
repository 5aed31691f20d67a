// nl2sql/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nl2sql")]
#[command(about = "Natural-language questions in, safe read-only SQL results out", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🌐 Runs the HTTP gateway (POST /api/ai-query)
    Serve {
        /// Configuration file (default: ./nl2sql.yaml or ./nl2sql.yml)
        #[arg(long, short, env = "NL2SQL_CONFIG")]
        config: Option<PathBuf>,
    },

    /// 💬 Asks one question end to end and prints the result table
    Ask {
        question: String,

        #[arg(long, short, env = "NL2SQL_CONFIG")]
        config: Option<PathBuf>,
    },

    /// 🛡️ Runs the extractor and safety validator on a candidate statement (offline)
    Check {
        sql: String,

        #[arg(long, short, env = "NL2SQL_CONFIG")]
        config: Option<PathBuf>,
    },
}
