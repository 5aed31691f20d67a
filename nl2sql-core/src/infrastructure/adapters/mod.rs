// nl2sql-core/src/infrastructure/adapters/mod.rs

pub mod duckdb;
pub mod gemini;

pub use self::duckdb::DuckDBExecutor;
pub use gemini::GeminiClient;
