// nl2sql/src/commands/check.rs
//
// USE CASE: Run the extractor + safety validator on a candidate statement.
// No model, no database.

use std::path::PathBuf;

use nl2sql_core::domain::sql::{DenyList, SqlValidator, ValidationVerdict, extract_sql};

/// Returns `true` when the statement would be allowed to run.
pub fn execute(sql: String, config_path: Option<PathBuf>) -> anyhow::Result<bool> {
    let config = super::load(config_path.as_deref())?;
    let validator = SqlValidator::new(DenyList::new(&config.gateway.forbidden_tokens)?);

    let candidate = extract_sql(&sql);
    match validator.validate(&candidate) {
        ValidationVerdict::Accepted(sql) => {
            println!("✅ Accepted");
            println!("{}", sql);
            Ok(true)
        }
        ValidationVerdict::Rejected(reason) => {
            eprintln!("❌ Rejected: {}", reason);
            eprintln!("   SQL: {}", candidate);
            Ok(false)
        }
    }
}
