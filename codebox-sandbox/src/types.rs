//! Result records for sandbox operations

use serde::{Deserialize, Serialize};

/// Result of running a command in the sandbox
///
/// `success == true` implies the launcher exited with code 0 and `error` is
/// absent. A timeout carries neither stdout nor stderr.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    /// Result for a launcher process that ran to completion
    pub fn completed(exit_ok: bool, stdout: String, stderr: String) -> Self {
        let error = if exit_ok { None } else { Some(stderr.clone()) };
        Self {
            success: exit_ok,
            stdout: Some(stdout),
            stderr: Some(stderr),
            error,
        }
    }

    /// Result for a run that exceeded its timeout
    pub fn timeout() -> Self {
        Self {
            success: false,
            stdout: None,
            stderr: None,
            error: Some("Timeout".to_string()),
        }
    }

    /// Result for a run that could not be started or completed
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: None,
            stderr: None,
            error: Some(message.into()),
        }
    }
}

/// Result of a sandbox file operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileResult {
    /// Result for a successful write, echoing the in-sandbox path
    pub fn written(path: impl Into<String>) -> Self {
        Self {
            success: true,
            path: Some(path.into()),
            content: None,
            error: None,
        }
    }

    /// Result for a successful read
    pub fn read(content: impl Into<String>) -> Self {
        Self {
            success: true,
            path: None,
            content: Some(content.into()),
            error: None,
        }
    }

    /// Result for a failed file operation
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            path: None,
            content: None,
            error: Some(message.into()),
        }
    }
}
