// nl2sql-core/src/infrastructure/error.rs

use miette::Diagnostic;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("DuckDB Engine Error: {0}")]
    #[diagnostic(
        code(nl2sql::infra::database::duckdb),
        help("An error occurred inside the SQL engine.")
    )]
    DuckDB(#[from] duckdb::Error),

    #[error("Query exceeded the execution timeout of {0:?}")]
    #[diagnostic(code(nl2sql::infra::database::timeout))]
    Timeout(Duration),

    #[error("Database handle poisoned")]
    #[diagnostic(code(nl2sql::infra::database::poisoned))]
    Poisoned,

    #[error("Query worker failed: {0}")]
    #[diagnostic(code(nl2sql::infra::database::worker))]
    Worker(String),
}

#[derive(Error, Debug, Diagnostic)]
pub enum ModelError {
    #[error("Language model request failed: {0}")]
    #[diagnostic(
        code(nl2sql::infra::model::http),
        help("Check network access to the model provider.")
    )]
    Http(#[from] reqwest::Error),

    #[error("Language model API error ({status}): {message}")]
    #[diagnostic(code(nl2sql::infra::model::api))]
    Api { status: u16, message: String },

    #[error("Language model returned an empty response.")]
    #[diagnostic(code(nl2sql::infra::model::empty))]
    EmptyResponse,

    #[error("Malformed language model response: {0}")]
    #[diagnostic(code(nl2sql::infra::model::malformed))]
    MalformedResponse(String),

    #[error("Language model did not answer within {0:?}")]
    #[diagnostic(code(nl2sql::infra::model::timeout))]
    Timeout(Duration),

    #[error("API key not found in environment variable '{0}'")]
    #[diagnostic(
        code(nl2sql::infra::model::api_key),
        help("Export the key, or point `model.api_key_env` at the right variable.")
    )]
    MissingApiKey(String),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE (Abstracted) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- LANGUAGE MODEL ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    LanguageModel(#[from] ModelError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(nl2sql::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(nl2sql::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Configuration not found at '{0}'")]
    #[diagnostic(code(nl2sql::infra::config_missing))]
    ConfigNotFound(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(nl2sql::infra::config_invalid))]
    InvalidConfig(#[from] validator::ValidationErrors),

    // --- TEMPLATING ---
    #[error("Template Rendering Error: {0}")]
    #[diagnostic(
        code(nl2sql::infra::template),
        help("Check the prompt template syntax ({{ ... }}).")
    )]
    TemplateError(#[from] minijinja::Error),
}

// Manual implementation for shortcuts (e.g. `?` operator on duckdb calls)
impl From<duckdb::Error> for InfrastructureError {
    fn from(err: duckdb::Error) -> Self {
        InfrastructureError::Database(DatabaseError::DuckDB(err))
    }
}

impl From<reqwest::Error> for InfrastructureError {
    fn from(err: reqwest::Error) -> Self {
        InfrastructureError::LanguageModel(ModelError::Http(err))
    }
}
