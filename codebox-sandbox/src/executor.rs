//! Sandbox executor
//!
//! Runs commands inside the sandbox by invoking its external launcher with
//! the command as a single argument. The launcher's exit code and captured
//! output are the whole contract; the command itself is opaque here.

use crate::types::ExecutionResult;
use codebox_common::SandboxConfig;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::task::JoinHandle;

/// Executes commands via the sandbox launcher
pub struct SandboxExecutor {
    config: SandboxConfig,
}

impl SandboxExecutor {
    pub fn new(config: SandboxConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Run a command through the launcher, bounded by `timeout`.
    ///
    /// Never returns an Err: spawn failures, wait failures and timeouts all
    /// fold into the result record.
    pub async fn run(&self, command: &str, timeout: Duration) -> ExecutionResult {
        tracing::info!(
            launcher = %self.config.launcher,
            command_len = command.len(),
            timeout_secs = timeout.as_secs(),
            "Running sandbox command"
        );

        let mut child = match Command::new(self.config.launcher_path())
            .arg(command)
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .stdin(std::process::Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                return ExecutionResult::failure(format!("Failed to spawn launcher: {}", e));
            }
        };

        let stdout_task = child.stdout.take().map(collect_pipe);
        let stderr_task = child.stderr.take().map(collect_pipe);

        let status = match tokio::time::timeout(timeout, child.wait()).await {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => {
                return ExecutionResult::failure(format!("Process wait error: {}", e));
            }
            Err(_) => {
                let _ = child.kill().await;
                tracing::warn!(timeout_secs = timeout.as_secs(), "Sandbox command timed out");
                return ExecutionResult::timeout();
            }
        };

        let stdout = drain(stdout_task).await;
        let stderr = drain(stderr_task).await;

        ExecutionResult::completed(status.success(), stdout, stderr)
    }

    /// Write a file into the sandbox's /tmp and run it.
    ///
    /// The host-side path is the sandbox root plus `/tmp/<filename>`; every
    /// `{file}` in the run template is replaced with the in-sandbox path.
    /// Existing files at the same name are overwritten in place, so
    /// concurrent callers reusing a filename race on this write.
    pub async fn write_and_run(
        &self,
        filename: &str,
        content: &str,
        run_template: &str,
        timeout: Duration,
    ) -> ExecutionResult {
        let guest_path = format!("/tmp/{}", filename);
        let host_path = self.config.root_path().join(&guest_path[1..]);

        if let Some(parent) = host_path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                return ExecutionResult::failure(format!(
                    "Failed to create {}: {}",
                    parent.display(),
                    e
                ));
            }
        }

        if let Err(e) = tokio::fs::write(&host_path, content).await {
            return ExecutionResult::failure(format!(
                "Failed to write {}: {}",
                host_path.display(),
                e
            ));
        }

        let command = run_template.replace("{file}", &guest_path);
        self.run(&command, timeout).await
    }
}

fn collect_pipe<R>(mut pipe: R) -> JoinHandle<Vec<u8>>
where
    R: AsyncReadExt + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf).await;
        buf
    })
}

async fn drain(task: Option<JoinHandle<Vec<u8>>>) -> String {
    match task {
        Some(handle) => {
            let bytes = handle.await.unwrap_or_default();
            String::from_utf8_lossy(&bytes).into_owned()
        }
        None => String::new(),
    }
}
