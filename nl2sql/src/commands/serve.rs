// nl2sql/src/commands/serve.rs
//
// USE CASE: Run the HTTP gateway.

use std::path::PathBuf;
use std::sync::Arc;

use crate::http::{AppState, start_server};

pub async fn execute(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    println!("⚙️  Loading configuration...");
    let config = super::load(config_path.as_deref())?;
    println!(
        "   Model: {} | Database: {}{}",
        config.model.model,
        config.database.path,
        if config.database.read_only { " (read-only)" } else { "" }
    );

    let gateway = super::build_gateway(&config)?;
    let state = AppState {
        gateway: Arc::new(gateway),
    };

    start_server(&config.server, state).await
}
