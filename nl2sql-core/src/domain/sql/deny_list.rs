// nl2sql-core/src/domain/sql/deny_list.rs

use crate::domain::error::DomainError;
use regex::Regex;

/// Tokens that may never appear in a generated statement.
pub const DEFAULT_FORBIDDEN_TOKENS: &[&str] = &[
    // data mutation
    "INSERT",
    "UPDATE",
    "DELETE",
    "MERGE",
    // schema mutation
    "CREATE",
    "ALTER",
    "DROP",
    "TRUNCATE",
    // privileges
    "GRANT",
    "REVOKE",
    "DENY",
    // execution
    "EXEC",
    "EXECUTE",
    // bulk load / external data sources
    "BULK",
    "OPENROWSET",
    "OPENDATASOURCE",
    // extended & system stored procedures
    "XP_",
    "SP_",
    // statement separators and comments
    ";",
    "--",
    "/*",
];

/// How a deny-list entry is matched against the normalized statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Whole word: `CREATE` matches `create table` but not `created_at`.
    Word,
    /// Start of a word: `XP_` matches `xp_cmdshell`.
    Prefix,
    /// Literal symbol sequence anywhere: `;`, `--`, `/*`.
    Symbol,
}

impl TokenKind {
    fn classify(token: &str) -> Self {
        if token.chars().all(is_word_char) {
            if token.ends_with('_') {
                TokenKind::Prefix
            } else {
                TokenKind::Word
            }
        } else {
            TokenKind::Symbol
        }
    }
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

struct CompiledToken {
    token: String,
    kind: TokenKind,
    // None for symbols, which are matched literally.
    regex: Option<Regex>,
}

impl CompiledToken {
    fn find(&self, normalized: &str) -> Option<usize> {
        match &self.regex {
            Some(re) => re.find(normalized).map(|m| m.start()),
            None => normalized.find(&self.token),
        }
    }
}

/// Compiled deny-list. Entries are uppercased once at construction, so callers
/// must hand in an uppercased statement.
pub struct DenyList {
    tokens: Vec<CompiledToken>,
}

impl DenyList {
    pub fn new<I, S>(tokens: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();

        for raw in tokens {
            let token = raw.as_ref().trim().to_uppercase();
            if token.is_empty() {
                return Err(DomainError::InvalidDenyToken(raw.as_ref().to_string()));
            }

            let kind = TokenKind::classify(&token);
            let regex = match kind {
                TokenKind::Word => Some(format!(r"\b{}\b", regex::escape(&token))),
                TokenKind::Prefix => Some(format!(r"\b{}\w*", regex::escape(&token))),
                TokenKind::Symbol => None,
            }
            .map(|pattern| Regex::new(&pattern))
            .transpose()
            .map_err(|e| DomainError::InvalidDenyToken(format!("{token}: {e}")))?;

            compiled.push(CompiledToken { token, kind, regex });
        }

        if compiled.is_empty() {
            return Err(DomainError::InvalidDenyToken(
                "deny-list must contain at least one token".into(),
            ));
        }

        Ok(Self { tokens: compiled })
    }

    /// The built-in deny-list ([`DEFAULT_FORBIDDEN_TOKENS`]).
    pub fn standard() -> Result<Self, DomainError> {
        Self::new(DEFAULT_FORBIDDEN_TOKENS)
    }

    /// Returns the forbidden token occurring first in `normalized`, if any.
    pub fn first_match(&self, normalized: &str) -> Option<&str> {
        self.tokens
            .iter()
            .filter_map(|t| t.find(normalized).map(|pos| (pos, t)))
            .min_by_key(|(pos, _)| *pos)
            .map(|(_, t)| t.token.as_str())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn kind_of(&self, token: &str) -> Option<TokenKind> {
        let token = token.to_uppercase();
        self.tokens.iter().find(|t| t.token == token).map(|t| t.kind)
    }
}

impl std::fmt::Debug for DenyList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.tokens.iter().map(|t| &t.token))
            .finish()
    }
}
