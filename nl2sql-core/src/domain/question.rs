// nl2sql-core/src/domain/question.rs

use crate::domain::error::DomainError;

/// Inbound question, checked at the boundary before the pipeline starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    question: String,
}

impl QueryRequest {
    /// Rejects blank questions and questions longer than `max_length` characters.
    pub fn new(question: impl Into<String>, max_length: usize) -> Result<Self, DomainError> {
        let question = question.into();

        if question.trim().is_empty() {
            return Err(DomainError::EmptyQuestion);
        }

        let length = question.chars().count();
        if length > max_length {
            return Err(DomainError::QuestionTooLong {
                length,
                max: max_length,
            });
        }

        Ok(Self { question })
    }

    pub fn question(&self) -> &str {
        &self.question
    }
}
