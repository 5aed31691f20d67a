// nl2sql/src/commands/mod.rs

pub mod ask;
pub mod check;
pub mod serve;

use std::path::Path;
use std::sync::Arc;

use nl2sql_core::Nl2SqlGateway;
use nl2sql_core::infrastructure::adapters::{DuckDBExecutor, GeminiClient};
use nl2sql_core::infrastructure::config::{GatewayConfig, ModelProvider, load_config};

/// Loads the configuration from `--config` or the working directory.
pub fn load(config_path: Option<&Path>) -> anyhow::Result<GatewayConfig> {
    let cwd = std::env::current_dir()?;
    Ok(load_config(config_path, &cwd)?)
}

/// Wires the real adapters into the gateway (explicit composition root).
pub fn build_gateway(config: &GatewayConfig) -> anyhow::Result<Nl2SqlGateway> {
    let model = match config.model.provider {
        ModelProvider::Gemini => Arc::new(GeminiClient::from_config(&config.model)?),
    };
    let executor = Arc::new(DuckDBExecutor::new(
        &config.database.path,
        config.database.read_only,
    )?);

    Ok(Nl2SqlGateway::new(model, executor, config)?)
}
