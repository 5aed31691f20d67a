// nl2sql-core/src/infrastructure/adapters/gemini.rs

//! Google Gemini adapter for the [`LanguageModel`] port.
//!
//! One `generateContent` call per question. No retries: a failed generation
//! is reported and the caller may resubmit.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::infrastructure::config::ModelConfig;
use crate::infrastructure::error::{InfrastructureError, ModelError};
use crate::ports::language_model::{LanguageModel, Prompt, SamplingConfig};

/// Base URL for the Gemini REST API.
pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(
        api_key: &str,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, InfrastructureError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key).map_err(|e| {
                InfrastructureError::ConfigError(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(ModelError::Http)?;

        Ok(Self {
            client,
            model: model.into(),
            base_url: API_BASE_URL.to_string(),
            timeout,
        })
    }

    /// Builds the client from config, reading the key from `config.api_key_env`.
    pub fn from_config(config: &ModelConfig) -> Result<Self, InfrastructureError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ModelError::MissingApiKey(config.api_key_env.clone()))?;

        let client = Self::new(
            &api_key,
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;

        Ok(match &config.base_url {
            Some(url) => client.with_base_url(url.clone()),
            None => client,
        })
    }

    /// Overrides the base URL (proxies, wiremock).
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(
        &self,
        prompt: &Prompt,
        sampling: &SamplingConfig,
    ) -> Result<String, InfrastructureError> {
        let request = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &prompt.system_instruction,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &prompt.user_content,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: sampling.temperature,
                max_output_tokens: sampling.max_output_tokens,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        debug!(status = %status, model = %self.model, "generateContent response received");

        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|api_err| match api_err.error.status {
                    Some(kind) => format!("{}: {}", kind, api_err.error.message),
                    None => api_err.error.message,
                })
                .unwrap_or(body);
            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| ModelError::MalformedResponse(e.to_string()))?;

        let text = parsed.text();
        if text.trim().is_empty() {
            return Err(ModelError::EmptyResponse.into());
        }

        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

impl GeminiClient {
    fn transport_error(&self, err: reqwest::Error) -> InfrastructureError {
        if err.is_timeout() {
            ModelError::Timeout(self.timeout).into()
        } else {
            ModelError::Http(err).into()
        }
    }
}

// --- Wire types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, all parts concatenated.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    status: Option<String>,
}
