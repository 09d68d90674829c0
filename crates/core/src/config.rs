// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host configuration
//!
//! Everything the controller needs is carried by [`HostConfig`], which is
//! built once (usually from `pyhost.toml`) and passed in at construction.
//! Nothing in the core reads process-wide globals.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default deadline for a persistent-mode run
pub const PERSISTENT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default deadline for an ephemeral-mode run
pub const EPHEMERAL_TIMEOUT: Duration = Duration::from_secs(45);

/// Default deadline for the dependency installer
pub const INSTALL_TIMEOUT: Duration = Duration::from_secs(600);

/// Errors loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),
    #[error("invalid config {0}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Artifact retention policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecMode {
    /// Artifacts and dependency cache kept under `<root>/<identity>/<script>/`
    #[default]
    Persistent,
    /// Artifacts kept under a per-session directory, deleted after the run
    Ephemeral,
}

impl ExecMode {
    pub fn name(&self) -> &'static str {
        match self {
            ExecMode::Persistent => "persistent",
            ExecMode::Ephemeral => "ephemeral",
        }
    }

    pub fn default_timeout(&self) -> Duration {
        match self {
            ExecMode::Persistent => PERSISTENT_TIMEOUT,
            ExecMode::Ephemeral => EPHEMERAL_TIMEOUT,
        }
    }
}

impl std::fmt::Display for ExecMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ExecMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "persistent" => Ok(ExecMode::Persistent),
            "ephemeral" => Ok(ExecMode::Ephemeral),
            other => Err(ConfigError::Invalid(format!("unknown mode: {}", other))),
        }
    }
}

/// Top-level configuration for a host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Directory holding all hosted artifacts
    pub root: PathBuf,
    pub mode: ExecMode,
    /// The single identity allowed to use the host
    pub operator: Option<String>,
    pub execution: ExecutionConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./hosted_scripts"),
            mode: ExecMode::default(),
            operator: None,
            execution: ExecutionConfig::default(),
        }
    }
}

impl HostConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: HostConfig =
            toml::from_str(text).map_err(|e| ConfigError::Parse(origin.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        Self::from_toml(&text, path)
    }

    /// Deadline for one script run, falling back to the mode default
    pub fn run_timeout(&self) -> Duration {
        self.execution
            .timeout
            .unwrap_or_else(|| self.mode.default_timeout())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let exec = &self.execution;
        if exec.interpreter.is_empty() {
            return Err(ConfigError::Invalid("interpreter cannot be empty".into()));
        }
        if exec.installer.is_empty() {
            return Err(ConfigError::Invalid("installer cannot be empty".into()));
        }
        if exec.script_extension.trim_start_matches('.').is_empty() {
            return Err(ConfigError::Invalid(
                "script_extension cannot be empty".into(),
            ));
        }
        if exec.search_path_var.is_empty() || exec.search_path_var.contains('=') {
            return Err(ConfigError::Invalid(format!(
                "invalid search_path_var: {:?}",
                exec.search_path_var
            )));
        }
        if exec.timeout == Some(Duration::ZERO) {
            return Err(ConfigError::Invalid("timeout must be positive".into()));
        }
        Ok(())
    }
}

/// How scripts and their dependencies are executed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutionConfig {
    /// Run deadline; `None` picks the mode default
    #[serde(with = "humantime_serde")]
    pub timeout: Option<Duration>,
    #[serde(with = "humantime_serde")]
    pub install_timeout: Duration,
    /// Command template used to run the script (`{script}` placeholder)
    pub interpreter: Vec<String>,
    /// Command template used to install dependencies
    /// (`{requirements}` and `{deps}` placeholders)
    pub installer: Vec<String>,
    /// Module search-path variable the dependency cache is prepended to
    pub search_path_var: String,
    /// Extension a script upload must carry, without the dot
    pub script_extension: String,
    /// Extension a manifest upload must carry; empty accepts any file
    pub requirements_extension: String,
    /// Maximum characters of stdout reported
    pub stdout_limit: usize,
    /// Maximum characters of stderr reported
    pub stderr_limit: usize,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            install_timeout: INSTALL_TIMEOUT,
            interpreter: vec!["python3".into(), "{script}".into()],
            installer: vec![
                "pip".into(),
                "install".into(),
                "-r".into(),
                "{requirements}".into(),
                "--target".into(),
                "{deps}".into(),
            ],
            search_path_var: "PYTHONPATH".into(),
            script_extension: "py".into(),
            requirements_extension: "txt".into(),
            stdout_limit: 3000,
            stderr_limit: 1000,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
