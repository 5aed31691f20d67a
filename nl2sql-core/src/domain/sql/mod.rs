// nl2sql-core/src/domain/sql/mod.rs

pub mod deny_list;
pub mod extractor;
pub mod validator;

pub use deny_list::{DEFAULT_FORBIDDEN_TOKENS, DenyList, TokenKind};
pub use extractor::extract_sql;
pub use validator::{Rejection, SqlValidator, ValidationVerdict};
