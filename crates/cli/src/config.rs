// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host configuration from file, environment and flags

use anyhow::{Context, Result};
use clap::Args;
use pyhost_core::{ExecMode, HostConfig};
use std::path::PathBuf;

/// Identity used when neither a flag nor the config names one
const FALLBACK_IDENTITY: &str = "local";

/// Flags shared by every command; each overrides the config file
#[derive(Args, Debug, Default, Clone)]
pub struct HostArgs {
    /// TOML config file
    #[arg(long, global = true, env = "PYHOST_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding hosted scripts
    #[arg(long, global = true, env = "PYHOST_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Execution mode: persistent or ephemeral
    #[arg(long, global = true, env = "PYHOST_MODE")]
    pub mode: Option<ExecMode>,

    /// The operator allowed to use this host
    #[arg(long, global = true, env = "PYHOST_OPERATOR")]
    pub operator: Option<String>,

    /// Who is issuing this command (defaults to the operator)
    #[arg(long, global = true, env = "PYHOST_IDENTITY")]
    pub identity: Option<String>,
}

impl HostArgs {
    pub fn identity(&self, host: &HostConfig) -> String {
        self.identity
            .clone()
            .or_else(|| host.operator.clone())
            .unwrap_or_else(|| FALLBACK_IDENTITY.to_string())
    }
}

/// Build the effective configuration: file (if any), then flag overrides.
///
/// The root is made absolute so child processes, which run inside their
/// artifact directory, see usable paths.
pub fn load(args: &HostArgs) -> Result<HostConfig> {
    let mut host = match &args.config {
        Some(path) => HostConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => HostConfig::default(),
    };

    if let Some(root) = &args.root {
        host.root = root.clone();
    }
    if let Some(mode) = args.mode {
        host.mode = mode;
    }
    if let Some(operator) = &args.operator {
        host.operator = Some(operator.clone());
    }
    host.validate().context("invalid configuration")?;

    host.root = std::path::absolute(&host.root)
        .with_context(|| format!("cannot resolve root {}", host.root.display()))?;
    Ok(host)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
