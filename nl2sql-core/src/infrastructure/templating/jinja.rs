// nl2sql-core/src/infrastructure/templating/jinja.rs

// Renders prompt templates with minijinja. Blocks are trimmed so that
// `{% for %}` loops over columns produce one clean line per item.

use minijinja::Environment;

use crate::application::ports::TemplateEngine;
use crate::error::Nl2SqlError;
use crate::infrastructure::error::InfrastructureError;

pub struct JinjaRenderer<'a> {
    env: Environment<'a>,
}

impl<'a> JinjaRenderer<'a> {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        // Quoted identifier, for schemas with spaces or reserved words
        env.add_filter("quote_ident", |value: &str| -> String {
            format!("\"{}\"", value.replace('"', "\"\""))
        });

        Self { env }
    }
}

impl<'a> Default for JinjaRenderer<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> TemplateEngine for JinjaRenderer<'a> {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, Nl2SqlError> {
        self.env
            .render_str(template, context)
            .map_err(|e| Nl2SqlError::Infrastructure(InfrastructureError::TemplateError(e)))
    }
}
