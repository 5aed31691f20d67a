// nl2sql-core/src/domain/schema.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Description of the single table the model is allowed to query.
/// Only used to build the prompt; nothing here is introspected from the store.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Validate)]
pub struct TableSchema {
    #[validate(length(min = 1, message = "table name cannot be empty"))]
    pub table: String,

    #[validate(length(min = 1, message = "at least one column must be described"))]
    #[validate(nested)]
    pub columns: Vec<ColumnSpec>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Validate)]
pub struct ColumnSpec {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default)]
    pub primary_key: bool,
    /// Free-form hint for the model (e.g. "1 = active, 0 = inactive").
    #[serde(default)]
    pub note: Option<String>,
}

fn default_nullable() -> bool {
    true
}

impl ColumnSpec {
    fn new(name: &str, data_type: &str, nullable: bool) -> Self {
        Self {
            name: name.to_string(),
            data_type: data_type.to_string(),
            nullable,
            primary_key: false,
            note: None,
        }
    }

    fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    fn note(mut self, note: &str) -> Self {
        self.note = Some(note.to_string());
        self
    }

    /// `Price (decimal(18,2), NOT NULL)`
    pub fn describe(&self) -> String {
        let mut attrs = vec![self.data_type.clone()];
        if self.primary_key {
            attrs.push("PK".to_string());
        } else if self.nullable {
            attrs.push("NULL".to_string());
        } else {
            attrs.push("NOT NULL".to_string());
        }
        if let Some(note) = &self.note {
            attrs.push(note.clone());
        }
        format!("{} ({})", self.name, attrs.join(", "))
    }
}

impl Default for TableSchema {
    /// The product catalog table.
    fn default() -> Self {
        Self {
            table: "Products".to_string(),
            columns: vec![
                ColumnSpec::new("Id", "uniqueidentifier", false).primary_key(),
                ColumnSpec::new("Name", "nvarchar(200)", false),
                ColumnSpec::new("Description", "nvarchar(1000)", true),
                ColumnSpec::new("Price", "decimal(18,2)", false),
                ColumnSpec::new("StockQuantity", "int", false),
                ColumnSpec::new("Category", "nvarchar(100)", true),
                ColumnSpec::new("ImageUrl", "nvarchar(500)", true),
                ColumnSpec::new("IsActive", "bit", false).note("1 = active, 0 = inactive"),
                ColumnSpec::new("CreatedAt", "datetime2", false),
                ColumnSpec::new("UpdatedAt", "datetime2", true),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_default_catalog_table() {
        let schema = TableSchema::default();
        assert_eq!(schema.table, "Products");
        assert_eq!(schema.columns.len(), 10);
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn test_column_description() {
        let schema = TableSchema::default();
        let described: Vec<String> = schema.columns.iter().map(ColumnSpec::describe).collect();
        assert_eq!(described[0], "Id (uniqueidentifier, PK)");
        assert_eq!(described[2], "Description (nvarchar(1000), NULL)");
        assert_eq!(described[3], "Price (decimal(18,2), NOT NULL)");
        assert_eq!(
            described[7],
            "IsActive (bit, NOT NULL, 1 = active, 0 = inactive)"
        );
    }

    #[test]
    fn test_yaml_deserialization_defaults() -> Result<()> {
        let yaml = "table: Orders\ncolumns:\n  - name: Total\n    type: decimal(10,2)\n    nullable: false\n  - name: Notes\n    type: text\n";
        let schema: TableSchema = serde_yaml::from_str(yaml)?;
        assert_eq!(schema.table, "Orders");
        assert!(!schema.columns[0].nullable);
        assert!(schema.columns[1].nullable);
        assert_eq!(schema.columns[1].describe(), "Notes (text, NULL)");
        Ok(())
    }

    #[test]
    fn test_empty_table_fails_validation() {
        let schema = TableSchema {
            table: String::new(),
            columns: vec![],
        };
        assert!(schema.validate().is_err());
    }
}
