//! Bridge from task descriptions to executed code
//!
//! One linear pass per call: generate → extract → dispatch → run. A failed
//! stage terminates the call with a record naming what went wrong; there are
//! no retries.

use crate::executor::SandboxExecutor;
use crate::extract::{CodeExtractor, ExtractedCode};
use crate::types::ExecutionResult;
use codebox_common::AppConfig;
use codebox_llm::{LlmResult, OllamaClient};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SYSTEM_PROMPT: &str =
    "You are a coding assistant. Write ONLY code, no explanation. Use ```python or ```bash.";

/// Terminal record for a generate-and-run task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Raw model response, attached when nothing could be extracted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_response: Option<String>,

    /// Language that was dispatched (or rejected), for auditing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Code that was attempted, for auditing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl TaskResult {
    fn no_code(ai_response: String) -> Self {
        Self {
            success: false,
            stdout: None,
            stderr: None,
            error: Some("No code generated".to_string()),
            ai_response: Some(ai_response),
            language: None,
            code: None,
        }
    }

    fn from_execution(result: ExecutionResult, language: String, code: String) -> Self {
        Self {
            success: result.success,
            stdout: result.stdout,
            stderr: result.stderr,
            error: result.error,
            ai_response: None,
            language: Some(language),
            code: Some(code),
        }
    }
}

/// Connects the Ollama client to the sandbox executor
pub struct SandboxBridge {
    client: OllamaClient,
    executor: SandboxExecutor,
    extractor: CodeExtractor,
    model: String,
    code_timeout: Duration,
}

impl SandboxBridge {
    pub fn new(config: &AppConfig) -> LlmResult<Self> {
        Ok(Self {
            client: OllamaClient::new(&config.ollama)?,
            executor: SandboxExecutor::new(config.sandbox.clone()),
            extractor: CodeExtractor::new(),
            model: config.ollama.model.clone(),
            code_timeout: Duration::from_secs(config.sandbox.code_timeout_secs),
        })
    }

    /// Override the model selected from config
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// List model names from the endpoint (empty on failure)
    pub async fn list_models(&self) -> Vec<String> {
        self.client.list_models().await
    }

    /// Generate code for `task`, extract it, and run it in the sandbox.
    pub async fn code_and_run(&self, task: &str) -> TaskResult {
        let prompt = format!("Write code for: {}", task);

        let response = match self
            .client
            .generate(&self.model, &prompt, Some(SYSTEM_PROMPT))
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Generation failed");
                return TaskResult::no_code(format!("Error: {}", e));
            }
        };

        let Some(ExtractedCode { language, code }) = self.extractor.extract(&response) else {
            tracing::info!(response_len = response.len(), "No code found in response");
            return TaskResult::no_code(response);
        };

        tracing::info!(language = %language, code_len = code.len(), "Dispatching extracted code");

        let result = match language.as_str() {
            "python" => {
                self.executor
                    .write_and_run("ai_code.py", &code, "python3 {file}", self.code_timeout)
                    .await
            }
            "bash" | "sh" => {
                self.executor
                    .write_and_run("ai_code.sh", &code, "bash {file}", self.code_timeout)
                    .await
            }
            other => ExecutionResult::failure(format!("Unsupported: {}", other)),
        };

        TaskResult::from_execution(result, language, code)
    }
}
