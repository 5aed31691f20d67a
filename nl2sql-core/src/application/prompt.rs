// nl2sql-core/src/application/prompt.rs

use serde_json::json;

use crate::application::ports::TemplateEngine;
use crate::domain::{ColumnSpec, QueryRequest, SqlDialect, TableSchema};
use crate::error::Nl2SqlError;
use crate::ports::Prompt;

pub const SYSTEM_PROMPT_TEMPLATE: &str = r#"You are a SQL expert working against {{ dialect }}. Translate the user's question about the catalog into a single {{ dialect }} SELECT query.

The database exposes exactly one table, {{ table | quote_ident }}, with these columns:
{% for column in columns %}
- {{ column }}
{% endfor %}

Rules:
1. Only generate SELECT statements. Never produce INSERT, UPDATE, DELETE, MERGE, DROP, ALTER, CREATE, TRUNCATE, EXEC or any other statement that changes data or schema.
2. Only query the {{ table | quote_ident }} table.
3. Always cap the result at {{ row_cap }} rows.
4. Return ONLY the raw SQL query: no markdown fences, no explanations, no comments.
5. For text searches, use LIKE with % wildcards for partial matches instead of =.
6. Use proper {{ dialect }} syntax. {{ row_limit_rule }}."#;

/// Builds the model request for a question.
///
/// The system instruction depends only on the schema, the dialect and the row
/// cap, so it is rendered once at construction. `build` is then pure.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    system_instruction: String,
}

impl PromptBuilder {
    pub fn new(
        renderer: &dyn TemplateEngine,
        schema: &TableSchema,
        dialect: SqlDialect,
        row_cap: usize,
    ) -> Result<Self, Nl2SqlError> {
        let columns: Vec<String> = schema.columns.iter().map(ColumnSpec::describe).collect();
        let context = json!({
            "dialect": dialect.name(),
            "table": schema.table,
            "columns": columns,
            "row_cap": row_cap,
            "row_limit_rule": dialect.row_limit_rule(row_cap),
        });

        let system_instruction = renderer.render(SYSTEM_PROMPT_TEMPLATE, &context)?;
        Ok(Self { system_instruction })
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn build(&self, request: &QueryRequest) -> Prompt {
        Prompt {
            system_instruction: self.system_instruction.clone(),
            user_content: request.question().to_string(),
        }
    }
}
