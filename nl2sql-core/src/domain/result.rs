// nl2sql-core/src/domain/result.rs

use serde::Serialize;
use std::collections::BTreeMap;

/// A single cell value as returned by the store.
/// `Null` is the explicit "no value" marker and serializes to JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

impl std::fmt::Display for SqlValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SqlValue::Null => write!(f, "NULL"),
            SqlValue::Bool(b) => write!(f, "{}", b),
            SqlValue::Integer(i) => write!(f, "{}", i),
            SqlValue::Float(x) => write!(f, "{}", x),
            SqlValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One result row: column name -> value.
pub type Row = BTreeMap<String, SqlValue>;

/// Model output before and after fence stripping. Lives for one request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedStatement {
    pub raw_text: String,
    pub extracted_sql: String,
}

/// Columns and rows as produced by a [`crate::ports::QueryExecutor`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOutput {
    /// Projection order of the statement.
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// What the caller gets back. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    question: String,
    generated_sql: String,
    columns: Vec<String>,
    rows: Vec<Row>,
    row_count: usize,
    execution_time_ms: u64,
}

impl QueryResult {
    /// Response assembly: pure aggregation, no validation happens here.
    pub fn assemble(
        question: impl Into<String>,
        generated_sql: impl Into<String>,
        output: QueryOutput,
        execution_time_ms: u64,
    ) -> Self {
        let row_count = output.rows.len();
        Self {
            question: question.into(),
            generated_sql: generated_sql.into(),
            columns: output.columns,
            rows: output.rows,
            row_count,
            execution_time_ms,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn generated_sql(&self) -> &str {
        &self.generated_sql
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn execution_time_ms(&self) -> u64 {
        self.execution_time_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn sample_output() -> QueryOutput {
        let mut row = Row::new();
        row.insert("Name".into(), SqlValue::Text("Keyboard".into()));
        row.insert("Category".into(), SqlValue::Null);
        row.insert("StockQuantity".into(), SqlValue::Integer(0));
        QueryOutput {
            columns: vec!["Name".into(), "Category".into(), "StockQuantity".into()],
            rows: vec![row],
        }
    }

    #[test]
    fn test_assemble_counts_rows() {
        let result = QueryResult::assemble("q", "SELECT 1", sample_output(), 12);
        assert_eq!(result.row_count(), 1);
        assert_eq!(result.columns(), ["Name", "Category", "StockQuantity"]);
        assert_eq!(result.execution_time_ms(), 12);
    }

    #[test]
    fn test_serializes_camel_case_with_explicit_nulls() -> Result<()> {
        let result = QueryResult::assemble(
            "Which products are out of stock?",
            "SELECT TOP 100 * FROM Products WHERE StockQuantity = 0",
            sample_output(),
            7,
        );
        let json = serde_json::to_value(&result)?;

        assert_eq!(json["question"], "Which products are out of stock?");
        assert_eq!(
            json["generatedSql"],
            "SELECT TOP 100 * FROM Products WHERE StockQuantity = 0"
        );
        assert_eq!(json["rowCount"], 1);
        assert_eq!(json["executionTimeMs"], 7);
        assert_eq!(json["columns"][1], "Category");
        assert!(json["rows"][0]["Category"].is_null());
        assert_eq!(json["rows"][0]["StockQuantity"], 0);
        Ok(())
    }

    #[test]
    fn test_null_is_not_an_empty_string() {
        assert_ne!(SqlValue::Null, SqlValue::Text(String::new()));
        assert_ne!(SqlValue::Null, SqlValue::Integer(0));
        assert!(SqlValue::Null.is_null());
    }
}
