//! Command implementations for the codebox CLI
//!
//! Every command prints a result record; a failed task is reported in the
//! record, not as a process error.

use anyhow::Result;
use codebox_common::AppConfig;
use codebox_llm::OllamaClient;
use codebox_sandbox::{SandboxBridge, Toolkit};

pub async fn execute_run(config: &AppConfig, model: Option<String>, task: &str) -> Result<()> {
    let mut bridge = SandboxBridge::new(config)?;
    if let Some(model) = model {
        bridge = bridge.with_model(model);
    }

    let result = bridge.code_and_run(task).await;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub async fn execute_models(config: &AppConfig) -> Result<()> {
    let client = OllamaClient::new(&config.ollama)?;
    let models = client.list_models().await;

    if models.is_empty() {
        eprintln!("No models available");
    } else {
        for model in models {
            println!("{}", model);
        }
    }
    Ok(())
}

pub async fn execute_api(config: &AppConfig, request: &str) -> Result<()> {
    let request: serde_json::Value = serde_json::from_str(request)?;
    let toolkit = Toolkit::new(config.sandbox.clone());

    let response = toolkit.api_handler(request).await;
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

pub async fn execute_exec(config: &AppConfig, command: &str) -> Result<()> {
    let toolkit = Toolkit::new(config.sandbox.clone());

    let result = toolkit.run(command).await;
    if let Some(stdout) = &result.stdout {
        print!("{}", stdout);
    }
    if let Some(error) = &result.error {
        eprintln!("{}", error);
    }
    Ok(())
}
