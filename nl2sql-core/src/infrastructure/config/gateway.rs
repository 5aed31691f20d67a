// nl2sql-core/src/infrastructure/config/gateway.rs

use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::{Validate, ValidationError};

use crate::domain::sql::DEFAULT_FORBIDDEN_TOKENS;
use crate::domain::{SqlDialect, TableSchema};
use crate::ports::SamplingConfig;

/// Full runtime configuration. Every section has defaults, so an empty
/// `nl2sql.yaml` (or none at all) yields a working gateway.
#[derive(Debug, Deserialize, Serialize, Clone, Default, Validate)]
pub struct GatewayConfig {
    #[serde(default)]
    #[validate(nested)]
    pub gateway: PipelineConfig,

    #[serde(default)]
    #[validate(nested)]
    pub schema: TableSchema,

    #[serde(default)]
    #[validate(nested)]
    pub model: ModelConfig,

    #[serde(default)]
    #[validate(nested)]
    pub database: DatabaseConfig,

    #[serde(default)]
    #[validate(nested)]
    pub server: ServerConfig,
}

/// Limits applied to every question.
#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct PipelineConfig {
    #[serde(default = "default_row_cap")]
    #[validate(range(min = 1, max = 10_000))]
    pub row_cap: usize,

    #[serde(default = "default_execution_timeout_secs")]
    #[validate(range(min = 1, max = 300))]
    pub execution_timeout_secs: u64,

    /// Overall deadline for one question (model call + execution).
    #[serde(default = "default_request_timeout_secs")]
    #[validate(range(min = 1, max = 600))]
    pub request_timeout_secs: u64,

    #[serde(default = "default_question_max_length")]
    #[validate(range(min = 1, max = 10_000))]
    pub question_max_length: usize,

    #[serde(default)]
    pub dialect: SqlDialect,

    #[serde(default = "default_forbidden_tokens")]
    #[validate(length(min = 1, message = "the deny-list cannot be empty"))]
    pub forbidden_tokens: Vec<String>,
}

impl PipelineConfig {
    pub fn execution_timeout(&self) -> Duration {
        Duration::from_secs(self.execution_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            row_cap: default_row_cap(),
            execution_timeout_secs: default_execution_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            question_max_length: default_question_max_length(),
            dialect: SqlDialect::default(),
            forbidden_tokens: default_forbidden_tokens(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    #[default]
    Gemini,
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct ModelConfig {
    #[serde(default)]
    pub provider: ModelProvider,

    #[serde(default = "default_model")]
    #[validate(length(min = 1))]
    pub model: String,

    /// Name of the environment variable holding the API key. The key itself
    /// never lives in the file.
    #[serde(default = "default_api_key_env")]
    #[validate(length(min = 1))]
    pub api_key_env: String,

    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_model_timeout_secs")]
    #[validate(range(min = 1, max = 600))]
    pub timeout_secs: u64,

    #[serde(default)]
    #[validate(custom(function = "validate_sampling"))]
    pub sampling: SamplingConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: ModelProvider::default(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            base_url: None,
            timeout_secs: default_model_timeout_secs(),
            sampling: SamplingConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    #[validate(length(min = 1))]
    pub path: String,

    /// Open the store read-only. Second line of defense behind the validator.
    #[serde(default = "default_true")]
    pub read_only: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            read_only: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    #[validate(length(min = 1))]
    pub host: String,

    #[serde(default = "default_port")]
    #[validate(range(min = 1))]
    pub port: u16,

    /// Origins allowed by CORS. Empty disables the CORS layer.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn validate_sampling(sampling: &SamplingConfig) -> Result<(), ValidationError> {
    if !(0.0..=2.0).contains(&sampling.temperature) {
        return Err(ValidationError::new("temperature_out_of_range"));
    }
    if sampling.max_output_tokens == 0 {
        return Err(ValidationError::new("max_output_tokens_zero"));
    }
    Ok(())
}

fn default_row_cap() -> usize {
    100
}
fn default_execution_timeout_secs() -> u64 {
    10
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_question_max_length() -> usize {
    500
}
fn default_forbidden_tokens() -> Vec<String> {
    DEFAULT_FORBIDDEN_TOKENS.iter().map(|t| t.to_string()).collect()
}
fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}
fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}
fn default_model_timeout_secs() -> u64 {
    20
}
fn default_db_path() -> String {
    "catalog.duckdb".to_string()
}
fn default_true() -> bool {
    true
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_defaults_are_valid() {
        let config = GatewayConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gateway.row_cap, 100);
        assert_eq!(config.gateway.execution_timeout(), Duration::from_secs(10));
        assert_eq!(config.gateway.question_max_length, 500);
        assert_eq!(config.model.model, "gemini-2.5-flash");
        assert_eq!(config.model.api_key_env, "GEMINI_API_KEY");
        assert!(config.database.read_only);
        assert_eq!(config.server.allowed_origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() -> Result<()> {
        let yaml = "gateway:\n  row_cap: 25\n  dialect: tsql\nmodel:\n  sampling:\n    temperature: 0.1\n";
        let config: GatewayConfig = serde_yaml::from_str(yaml)?;
        assert_eq!(config.gateway.row_cap, 25);
        assert_eq!(config.gateway.dialect, SqlDialect::TSql);
        assert_eq!(config.gateway.execution_timeout_secs, 10);
        assert_eq!(config.model.sampling.max_output_tokens, 500);
        assert_eq!(config.schema.table, "Products");
        Ok(())
    }

    #[test]
    fn test_out_of_range_values_fail_validation() -> Result<()> {
        let config: GatewayConfig = serde_yaml::from_str("gateway:\n  row_cap: 0\n")?;
        assert!(config.validate().is_err());

        let config: GatewayConfig =
            serde_yaml::from_str("model:\n  sampling:\n    temperature: 5.0\n")?;
        assert!(config.validate().is_err());

        let config: GatewayConfig = serde_yaml::from_str("gateway:\n  forbidden_tokens: []\n")?;
        assert!(config.validate().is_err());
        Ok(())
    }

    #[test]
    fn test_bind_address() {
        let server = ServerConfig {
            host: "0.0.0.0".into(),
            port: 5000,
            allowed_origins: vec![],
        };
        assert_eq!(server.bind_address(), "0.0.0.0:5000");
    }
}
