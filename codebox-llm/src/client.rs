//! Ollama HTTP client
//!
//! Talks to the `/api/generate` and `/api/tags` endpoints of a local Ollama
//! server. Generation is non-streaming: one POST, one JSON body back.

use crate::error::{LlmError, LlmResult};
use codebox_common::OllamaConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for a local Ollama endpoint
pub struct OllamaClient {
    generate_client: Client,
    tags_client: Client,
    host: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

impl OllamaClient {
    /// Create a client for the configured endpoint
    pub fn new(config: &OllamaConfig) -> LlmResult<Self> {
        let generate_client = Client::builder()
            .timeout(Duration::from_secs(config.generate_timeout_secs))
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let tags_client = Client::builder()
            .timeout(Duration::from_secs(config.tags_timeout_secs))
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            generate_client,
            tags_client,
            host: config.host.trim_end_matches('/').to_string(),
        })
    }

    /// Generate a completion for the prompt, with an optional system instruction.
    ///
    /// Returns the raw response text; a missing `response` field comes back as
    /// an empty string, which callers treat as "no usable code".
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
        system: Option<&str>,
    ) -> LlmResult<String> {
        let request = GenerateRequest {
            model,
            prompt,
            stream: false,
            system,
        };

        tracing::debug!(model, prompt_len = prompt.len(), "Sending generate request");

        let response = self
            .generate_client
            .post(format!("{}/api/generate", self.host))
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::Network(format!(
                "generate returned HTTP {}: {}",
                status.as_u16(),
                text
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        Ok(body.response)
    }

    /// List available model names.
    ///
    /// Never fails: any transport or parse error yields an empty list.
    pub async fn list_models(&self) -> Vec<String> {
        let result = async {
            let response = self
                .tags_client
                .get(format!("{}/api/tags", self.host))
                .send()
                .await
                .map_err(|e| LlmError::Network(e.to_string()))?;

            let body: TagsResponse = response
                .json()
                .await
                .map_err(|e| LlmError::Parse(e.to_string()))?;

            Ok::<_, LlmError>(body.models.into_iter().map(|m| m.name).collect())
        }
        .await;

        match result {
            Ok(models) => models,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list models");
                Vec::new()
            }
        }
    }
}
