// nl2sql-core/src/domain/sql/validator.rs

// First line of defense between model output and the database.
// Keyword level only: it cannot prove a statement safe, it only proves the
// absence of known-dangerous surface tokens. The executor runs on a read-only
// connection as the second line.

use std::fmt;

use crate::domain::sql::deny_list::{DenyList, is_word_char};

/// Why a candidate statement was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NotReadStatement,
    ForbiddenToken(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotReadStatement => write!(f, "only read statements are allowed"),
            Rejection::ForbiddenToken(token) => {
                write!(f, "query contains a forbidden token: {}", token)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationVerdict {
    /// Carries the statement exactly as it was submitted.
    Accepted(String),
    Rejected(Rejection),
}

impl ValidationVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationVerdict::Accepted(_))
    }
}

pub struct SqlValidator {
    deny_list: DenyList,
}

impl SqlValidator {
    pub fn new(deny_list: DenyList) -> Self {
        Self { deny_list }
    }

    pub fn validate(&self, sql: &str) -> ValidationVerdict {
        // Uppercased copy for matching only.
        let normalized = sql.to_uppercase();

        if !starts_with_select(normalized.trim_start()) {
            return ValidationVerdict::Rejected(Rejection::NotReadStatement);
        }

        if let Some(token) = self.deny_list.first_match(&normalized) {
            return ValidationVerdict::Rejected(Rejection::ForbiddenToken(token.to_string()));
        }

        ValidationVerdict::Accepted(sql.to_string())
    }
}

/// `SELECT` as a whole token: `SELECTED_ITEMS` is not a read statement.
fn starts_with_select(normalized: &str) -> bool {
    normalized
        .strip_prefix("SELECT")
        .is_some_and(|rest| rest.chars().next().is_none_or(|c| !is_word_char(c)))
}
