// nl2sql-core/src/ports/language_model.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::infrastructure::error::InfrastructureError;

/// System instruction + task content, as assembled by the prompt builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system_instruction: String,
    pub user_content: String,
}

/// Sampling parameters requested from the model.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    /// Near zero: SQL generation favors determinism over creativity.
    #[serde(default)]
    pub temperature: f32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_max_output_tokens() -> u32 {
    500
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Returns the generated text. An empty answer is an error, never an empty string.
    async fn generate(
        &self,
        prompt: &Prompt,
        sampling: &SamplingConfig,
    ) -> Result<String, InfrastructureError>;

    fn model_name(&self) -> &str;
}
