use crate::error::Nl2SqlError;

pub trait TemplateEngine: Send + Sync {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, Nl2SqlError>;
}
