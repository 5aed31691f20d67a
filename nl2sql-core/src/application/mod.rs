// nl2sql-core/src/application/mod.rs

pub mod gateway;
pub mod ports;
pub mod prompt;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use nl2sql_core::application::{Nl2SqlGateway, PromptBuilder};`

pub use gateway::Nl2SqlGateway;
pub use prompt::{PromptBuilder, SYSTEM_PROMPT_TEMPLATE};
