//! Toolkit API over the sandbox
//!
//! General-purpose sandbox operations behind a single JSON entry point:
//! run commands, install packages, read/write files, execute snippets.
//! Mirrors the action-table dispatch of the launcher's original tooling,
//! including the explicit "Unknown action" fallback.

use crate::executor::SandboxExecutor;
use crate::types::{ExecutionResult, FileResult};
use crate::Result;
use codebox_common::SandboxConfig;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;

/// Toolkit over a sandbox filesystem root and launcher
pub struct Toolkit {
    executor: SandboxExecutor,
    run_timeout: Duration,
}

impl Toolkit {
    pub fn new(config: SandboxConfig) -> Self {
        let workspace = config.workspace_dir();
        if let Err(e) = std::fs::create_dir_all(&workspace) {
            tracing::warn!(path = %workspace.display(), error = %e, "Failed to create workspace dir");
        }

        let run_timeout = Duration::from_secs(config.run_timeout_secs);
        Self {
            executor: SandboxExecutor::new(config),
            run_timeout,
        }
    }

    /// Run a raw command in the sandbox with the general timeout
    pub async fn run(&self, command: &str) -> ExecutionResult {
        self.executor.run(command, self.run_timeout).await
    }

    /// Install apt packages
    pub async fn install(&self, packages: &[String]) -> ExecutionResult {
        self.run(&format!(
            "DEBIAN_FRONTEND=noninteractive apt install -y {}",
            packages.join(" ")
        ))
        .await
    }

    /// Install pip packages
    pub async fn pip_install(&self, packages: &[String]) -> ExecutionResult {
        self.run(&format!("pip3 install {}", packages.join(" ")))
            .await
    }

    /// Write a file into the sandbox filesystem.
    ///
    /// Absolute paths land under the sandbox root; relative paths land in the
    /// default workspace directory.
    pub async fn write_file(&self, path: &str, content: &str) -> FileResult {
        match self.write_file_inner(path, content).await {
            Ok(()) => FileResult::written(path),
            Err(e) => FileResult::failure(e.to_string()),
        }
    }

    async fn write_file_inner(&self, path: &str, content: &str) -> Result<()> {
        let host_path = self.resolve(path);
        if let Some(parent) = host_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&host_path, content).await?;
        Ok(())
    }

    /// Read a file from the sandbox filesystem
    pub async fn read_file(&self, path: &str) -> FileResult {
        match tokio::fs::read_to_string(self.resolve(path)).await {
            Ok(content) => FileResult::read(content),
            Err(e) => FileResult::failure(e.to_string()),
        }
    }

    /// Write a snippet to a temp file and run it with the language's runner.
    ///
    /// Unknown languages are rejected without touching the sandbox.
    pub async fn execute_code(&self, code: &str, language: &str) -> ExecutionResult {
        let (ext, runner) = match language {
            "python" => ("py", "python3"),
            "javascript" => ("js", "node"),
            "bash" => ("sh", "bash"),
            other => {
                return ExecutionResult::failure(format!("Unsupported language: {}", other));
            }
        };

        let filename = format!("code_{}.{}", std::process::id(), ext);
        self.executor
            .write_and_run(&filename, code, &format!("{} {{file}}", runner), self.run_timeout)
            .await
    }

    /// Dispatch a JSON API request on its `action` field.
    ///
    /// Unknown or missing actions come back as an explicit error record, not
    /// a fault.
    pub async fn api_handler(&self, request: Value) -> Value {
        let action = request
            .get("action")
            .and_then(Value::as_str)
            .unwrap_or_default();

        tracing::debug!(action, "Dispatching API request");

        match action {
            "run" => to_record(self.run(str_field(&request, "command")).await),
            "install" => to_record(self.install(&list_field(&request, "packages")).await),
            "pip_install" => to_record(self.pip_install(&list_field(&request, "packages")).await),
            "write_file" => to_record(
                self.write_file(
                    str_field(&request, "path"),
                    str_field(&request, "content"),
                )
                .await,
            ),
            "read_file" => to_record(self.read_file(str_field(&request, "path")).await),
            "execute_code" => {
                let language = request
                    .get("language")
                    .and_then(Value::as_str)
                    .unwrap_or("python");
                to_record(
                    self.execute_code(str_field(&request, "code"), language)
                        .await,
                )
            }
            other => json!({
                "success": false,
                "error": format!("Unknown action: {}", other),
            }),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let config = self.executor.config();
        if let Some(stripped) = path.strip_prefix('/') {
            config.root_path().join(stripped)
        } else {
            config.workspace_dir().join(path)
        }
    }
}

fn to_record<T: serde::Serialize>(record: T) -> Value {
    serde_json::to_value(record)
        .unwrap_or_else(|e| json!({"success": false, "error": e.to_string()}))
}

fn str_field<'a>(request: &'a Value, key: &str) -> &'a str {
    request.get(key).and_then(Value::as_str).unwrap_or("")
}

fn list_field(request: &Value, key: &str) -> Vec<String> {
    request
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
