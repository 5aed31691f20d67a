// nl2sql-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

/// Pipeline stage a failure belongs to. Drives how it is reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Empty or oversized question. The pipeline never started.
    Input,
    /// The model call failed, timed out, or produced nothing usable.
    Generation,
    /// The candidate statement was refused by the safety validator.
    Validation,
    /// The statement was judged safe but the store failed to run it.
    Execution,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Generation => "generation",
            Self::Validation => "validation",
            Self::Execution => "execution",
            Self::Internal => "internal",
        }
    }

    /// Input and validation failures are actionable by the caller.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Input | Self::Validation)
    }
}

#[derive(Error, Debug)]
pub enum Nl2SqlError {
    // --- ERREURS DU DOMAINE (question invalide, SQL refusé) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE, rattachées à l'étape du pipeline ---
    #[error("SQL generation failed: {0}")]
    Generation(#[source] InfrastructureError),

    #[error("Query execution failed: {0}")]
    Execution(#[source] InfrastructureError),

    // Startup / configuration
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl Nl2SqlError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Nl2SqlError::Domain(DomainError::EmptyQuestion)
            | Nl2SqlError::Domain(DomainError::QuestionTooLong { .. }) => ErrorKind::Input,
            Nl2SqlError::Domain(DomainError::UnsafeStatement { .. }) => ErrorKind::Validation,
            Nl2SqlError::Domain(DomainError::InvalidDenyToken(_)) => ErrorKind::Internal,
            Nl2SqlError::Generation(_) => ErrorKind::Generation,
            Nl2SqlError::Execution(_) => ErrorKind::Execution,
            Nl2SqlError::Infrastructure(_) | Nl2SqlError::InternalError(_) => ErrorKind::Internal,
        }
    }
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for Nl2SqlError {
    fn from(err: std::io::Error) -> Self {
        Nl2SqlError::Infrastructure(InfrastructureError::Io(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sql::Rejection;
    use crate::infrastructure::error::{DatabaseError, ModelError};
    use std::time::Duration;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            Nl2SqlError::from(DomainError::EmptyQuestion).kind(),
            ErrorKind::Input
        );
        assert_eq!(
            Nl2SqlError::from(DomainError::UnsafeStatement {
                sql: "DELETE FROM Products".into(),
                reason: Rejection::NotReadStatement,
            })
            .kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            Nl2SqlError::Generation(ModelError::EmptyResponse.into()).kind(),
            ErrorKind::Generation
        );
        assert_eq!(
            Nl2SqlError::Execution(DatabaseError::Timeout(Duration::from_secs(10)).into()).kind(),
            ErrorKind::Execution
        );
    }

    #[test]
    fn test_client_errors() {
        assert!(ErrorKind::Input.is_client_error());
        assert!(ErrorKind::Validation.is_client_error());
        assert!(!ErrorKind::Generation.is_client_error());
        assert!(!ErrorKind::Execution.is_client_error());
    }

    #[test]
    fn test_validation_message_includes_reason() {
        let err = Nl2SqlError::from(DomainError::UnsafeStatement {
            sql: "SELECT 1; DROP TABLE Products".into(),
            reason: Rejection::ForbiddenToken(";".into()),
        });
        assert_eq!(
            err.to_string(),
            "Generated SQL was rejected: query contains a forbidden token: ;"
        );
    }
}
