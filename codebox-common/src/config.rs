//! Configuration management for codebox

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Ollama endpoint configuration
    #[serde(default)]
    pub ollama: OllamaConfig,
    /// Sandbox configuration
    #[serde(default)]
    pub sandbox: SandboxConfig,
}

/// Ollama endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL of the Ollama HTTP API
    #[serde(default = "OllamaConfig::default_host")]
    pub host: String,
    /// Default model to generate with
    #[serde(default = "OllamaConfig::default_model")]
    pub model: String,
    /// Timeout for /api/generate requests, in seconds
    #[serde(default = "OllamaConfig::default_generate_timeout")]
    pub generate_timeout_secs: u64,
    /// Timeout for /api/tags requests, in seconds
    #[serde(default = "OllamaConfig::default_tags_timeout")]
    pub tags_timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            model: Self::default_model(),
            generate_timeout_secs: Self::default_generate_timeout(),
            tags_timeout_secs: Self::default_tags_timeout(),
        }
    }
}

impl OllamaConfig {
    fn default_host() -> String {
        "http://127.0.0.1:11434".to_string()
    }

    fn default_model() -> String {
        "tinyllama".to_string()
    }

    fn default_generate_timeout() -> u64 {
        120
    }

    fn default_tags_timeout() -> u64 {
        10
    }
}

/// Sandbox filesystem and launcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxConfig {
    /// Host-side mount root of the sandbox filesystem
    #[serde(default = "SandboxConfig::default_root")]
    pub root: String,
    /// External launcher executable that runs a command inside the sandbox
    #[serde(default = "SandboxConfig::default_launcher")]
    pub launcher: String,
    /// Timeout for general toolkit commands, in seconds
    #[serde(default = "SandboxConfig::default_run_timeout")]
    pub run_timeout_secs: u64,
    /// Timeout for generated-code runs, in seconds
    #[serde(default = "SandboxConfig::default_code_timeout")]
    pub code_timeout_secs: u64,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            root: Self::default_root(),
            launcher: Self::default_launcher(),
            run_timeout_secs: Self::default_run_timeout(),
            code_timeout_secs: Self::default_code_timeout(),
        }
    }
}

impl SandboxConfig {
    fn default_root() -> String {
        "/workspace/ubuntu20-fs".to_string()
    }

    fn default_launcher() -> String {
        "/workspace/start-ubuntu20.sh".to_string()
    }

    fn default_run_timeout() -> u64 {
        300
    }

    fn default_code_timeout() -> u64 {
        120
    }

    /// Host path of the sandbox filesystem root
    pub fn root_path(&self) -> &Path {
        Path::new(&self.root)
    }

    /// Path of the launcher executable
    pub fn launcher_path(&self) -> &Path {
        Path::new(&self.launcher)
    }

    /// Host path of the default in-sandbox workspace directory
    pub fn workspace_dir(&self) -> PathBuf {
        self.root_path().join("root/workspace")
    }
}

impl AppConfig {
    /// Load configuration from file, writing defaults on first run
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Invalid(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Invalid(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ConfigError::Invalid("Cannot determine home directory".to_string()))?;

        Ok(home.join(".config").join("codebox").join("config.toml"))
    }
}
