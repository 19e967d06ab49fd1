//! Common test utilities for CLI testing.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::{tempdir, TempDir};

/// Test context with a temporary project directory
pub struct TestContext {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let data_path = temp_dir.path().join("translations.json");

        Self { temp_dir, data_path }
    }

    /// Write `transloc.yaml` into the project directory
    pub fn with_config(self, config: &str) -> Self {
        std::fs::write(self.config_path(), config).expect("Failed to write config");
        self
    }

    /// Write the translations data file
    pub fn with_data(self, data: serde_json::Value) -> Self {
        std::fs::write(&self.data_path, data.to_string()).expect("Failed to write data");
        self
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("transloc.yaml")
    }

    /// Get path to temp directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a command running in the project directory
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("transloc").expect("Binary not found");
        cmd.current_dir(self.path())
            .env_remove("TRANSLOC_CONFIG_PATH")
            .env_remove("TRANSLOC_LOG_LEVEL")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    /// A `read` command against the data file
    pub fn read(&self, locale: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg("read")
            .arg("--data")
            .arg(&self.data_path)
            .arg("--locale")
            .arg(locale);
        cmd
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// JSON output helpers
pub mod json {
    use serde_json::Value;

    pub fn parse_output(output: &[u8]) -> Value {
        serde_json::from_slice(output).expect("Failed to parse JSON output")
    }
}
