//! # Codebox LLM Integration
//!
//! Thin client for a local Ollama HTTP endpoint. Exposes single-shot text
//! generation and model listing; nothing here retries or streams.

pub mod client;
pub mod error;

pub use client::OllamaClient;
pub use error::{LlmError, LlmResult};
