pub mod dialect;
pub mod error;
pub mod question;
pub mod result;
pub mod schema;
pub mod sql;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use dialect::SqlDialect;
pub use error::DomainError;
pub use question::QueryRequest;
pub use result::{GeneratedStatement, QueryOutput, QueryResult, Row, SqlValue};
pub use schema::{ColumnSpec, TableSchema};
