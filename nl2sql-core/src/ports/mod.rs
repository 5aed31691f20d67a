// nl2sql-core/src/ports/mod.rs

// The two outbound collaborators of the gateway. Adapters live in
// infrastructure/adapters, fakes live next to the tests that need them.

pub mod executor;
pub mod language_model;

pub use executor::QueryExecutor;
pub use language_model::{LanguageModel, Prompt, SamplingConfig};
