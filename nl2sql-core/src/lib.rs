// nl2sql-core/src/lib.rs

// 1. Mandatory documentation for production code
#![allow(missing_docs)]

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Ports: the two outbound collaborators (LanguageModel, QueryExecutor)
pub mod ports;

// 2. Domain: question, extractor, safety validator, result shape.
// Pure, no I/O.
pub mod domain;

// 3. Infrastructure: DuckDB, Gemini, YAML config, minijinja
pub mod infrastructure;

// 4. Application: prompt builder and the gateway pipeline
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use application::Nl2SqlGateway;
pub use error::{ErrorKind, Nl2SqlError};
