// nl2sql-core/src/infrastructure/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, instrument};
use validator::Validate;

use super::gateway::GatewayConfig;
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_CANDIDATES: [&str; 2] = ["nl2sql.yaml", "nl2sql.yml"];

/// Loads the gateway configuration.
///
/// An explicit path must exist. Without one, `search_dir` is probed for
/// [`CONFIG_CANDIDATES`] and defaults are used when nothing is found.
/// Environment overrides are applied last, then the result is validated.
#[instrument(skip(search_dir))]
pub fn load_config(
    explicit: Option<&Path>,
    search_dir: &Path,
) -> Result<GatewayConfig, InfrastructureError> {
    let mut config = match resolve_config_path(explicit, search_dir)? {
        Some(path) => {
            info!(path = ?path, "Loading gateway configuration");
            parse_config_file(&path)?
        }
        None => {
            info!(dir = ?search_dir, "No configuration file found, using defaults");
            GatewayConfig::default()
        }
    };

    apply_env_overrides(&mut config)?;
    config.validate()?;

    Ok(config)
}

fn resolve_config_path(
    explicit: Option<&Path>,
    search_dir: &Path,
) -> Result<Option<PathBuf>, InfrastructureError> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(InfrastructureError::ConfigNotFound(
                path.display().to_string(),
            ));
        }
        return Ok(Some(path.to_path_buf()));
    }

    Ok(CONFIG_CANDIDATES
        .iter()
        .map(|name| search_dir.join(name))
        .find(|p| p.exists()))
}

fn parse_config_file(path: &Path) -> Result<GatewayConfig, InfrastructureError> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(GatewayConfig::default());
    }
    Ok(serde_yaml::from_str(&content)?)
}

// --- ENV LAYERING ---

fn apply_env_overrides(config: &mut GatewayConfig) -> Result<(), InfrastructureError> {
    apply_overrides_from(config, |key| std::env::var(key).ok())
}

/// `NL2SQL_*` variables win over the file. `lookup` is injected so tests do
/// not have to touch the process environment.
fn apply_overrides_from<F>(config: &mut GatewayConfig, lookup: F) -> Result<(), InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("NL2SQL_DB_PATH") {
        info!(old = ?config.database.path, new = ?val, "Overriding database path via ENV");
        config.database.path = val;
    }
    if let Some(val) = lookup("NL2SQL_ROW_CAP") {
        info!(old = config.gateway.row_cap, new = ?val, "Overriding row cap via ENV");
        config.gateway.row_cap = parse_override("NL2SQL_ROW_CAP", &val)?;
    }
    if let Some(val) = lookup("NL2SQL_MODEL") {
        info!(old = ?config.model.model, new = ?val, "Overriding model via ENV");
        config.model.model = val;
    }
    if let Some(val) = lookup("NL2SQL_HOST") {
        info!(old = ?config.server.host, new = ?val, "Overriding host via ENV");
        config.server.host = val;
    }
    if let Some(val) = lookup("NL2SQL_PORT") {
        info!(old = config.server.port, new = ?val, "Overriding port via ENV");
        config.server.port = parse_override("NL2SQL_PORT", &val)?;
    }
    Ok(())
}

fn parse_override<T: FromStr>(key: &str, raw: &str) -> Result<T, InfrastructureError> {
    raw.trim().parse().map_err(|_| {
        InfrastructureError::ConfigError(format!("{key} has an invalid value: '{raw}'"))
    })
}
