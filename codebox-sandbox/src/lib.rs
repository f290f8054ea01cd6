//! Codebox sandbox - turn LLM output into runnable artifacts
//!
//! Extracts fenced code blocks from model responses and executes them inside
//! an externally-managed sandbox filesystem by shelling out to its launcher.
//! Every public operation returns a serializable result record; nothing here
//! raises past the boundary.

mod bridge;
mod executor;
mod extract;
mod toolkit;
mod types;

pub use bridge::{SandboxBridge, TaskResult};
pub use executor::SandboxExecutor;
pub use extract::{CodeExtractor, ExtractedCode};
pub use toolkit::Toolkit;
pub use types::{ExecutionResult, FileResult};

/// Re-export common error types
pub type Result<T> = anyhow::Result<T>;
