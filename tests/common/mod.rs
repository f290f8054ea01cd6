//! Common test utilities shared across integration tests

use codebox_common::{OllamaConfig, SandboxConfig};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Setup logging for tests
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// Write a fake launcher that runs its single argument through the host shell.
///
/// This stands in for the external sandbox launcher: same calling convention
/// (one shell-command argument), same contract surface (exit code, stdout,
/// stderr).
pub fn fake_launcher(dir: &Path) -> PathBuf {
    let path = dir.join("launcher.sh");
    std::fs::write(&path, "#!/bin/sh\nexec /bin/sh -c \"$1\"\n").expect("write launcher");

    let mut perms = std::fs::metadata(&path).expect("stat launcher").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("chmod launcher");

    path
}

/// Fake launcher that maps in-sandbox /tmp paths onto the test root.
///
/// The real launcher runs commands inside a filesystem where `/tmp` is the
/// sandbox's own; this stand-in rewrites `/tmp/` to `<root>/tmp/` so commands
/// find the files the executor wrote.
pub fn translating_launcher(dir: &Path, root: &Path) -> PathBuf {
    let path = dir.join("translating-launcher.sh");
    let script = format!(
        "#!/bin/sh\ncmd=$(printf '%s' \"$1\" | sed \"s|/tmp/|{}/tmp/|g\")\nexec /bin/sh -c \"$cmd\"\n",
        root.display()
    );
    std::fs::write(&path, script).expect("write launcher");

    let mut perms = std::fs::metadata(&path).expect("stat launcher").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("chmod launcher");

    path
}

/// Sandbox config pointing at a test root and launcher
pub fn test_sandbox_config(root: &Path, launcher: &Path) -> SandboxConfig {
    let mut config = SandboxConfig::default();
    config.root = root.to_string_lossy().into_owned();
    config.launcher = launcher.to_string_lossy().into_owned();
    config
}

/// Ollama config pointing at a test endpoint
pub fn test_ollama_config(host: &str) -> OllamaConfig {
    let mut config = OllamaConfig::default();
    config.host = host.to_string();
    config.generate_timeout_secs = 5;
    config.tags_timeout_secs = 5;
    config
}
