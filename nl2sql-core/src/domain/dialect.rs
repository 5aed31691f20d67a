// nl2sql-core/src/domain/dialect.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// SQL flavor the model is asked to write. Only changes the row-limit rule
/// given in the prompt; the executor caps rows on its own regardless.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    #[default]
    DuckDB,
    #[serde(alias = "mssql", alias = "sqlserver")]
    TSql,
}

impl SqlDialect {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DuckDB => "DuckDB",
            Self::TSql => "T-SQL (SQL Server)",
        }
    }

    /// Prompt rule telling the model how to bound its result set.
    pub fn row_limit_rule(&self, row_cap: usize) -> String {
        match self {
            Self::DuckDB => format!("Use LIMIT {row_cap} to cap results, never TOP"),
            Self::TSql => format!("Use TOP {row_cap} instead of LIMIT to cap results"),
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
