// nl2sql-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

use crate::domain::sql::Rejection;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("The field 'question' is required.")]
    #[diagnostic(
        code(nl2sql::domain::question_missing),
        help("Ask something about the catalog, e.g. 'Which products are out of stock?'")
    )]
    EmptyQuestion,

    #[error("The field 'question' cannot exceed {max} characters.")]
    #[diagnostic(code(nl2sql::domain::question_too_long))]
    QuestionTooLong { length: usize, max: usize },

    #[error("Generated SQL was rejected: {reason}")]
    #[diagnostic(
        code(nl2sql::domain::unsafe_statement),
        help("Only a single SELECT against the catalog table is executed. Try rephrasing the question.")
    )]
    UnsafeStatement { sql: String, reason: Rejection },

    #[error("Invalid deny-list token: {0}")]
    #[diagnostic(code(nl2sql::domain::deny_list))]
    InvalidDenyToken(String),
}
