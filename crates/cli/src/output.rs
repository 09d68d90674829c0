// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use anyhow::{Context, Result};
use clap::ValueEnum;
use pyhost_core::{ExecutionResult, Outcome};
use serde::Serialize;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Operator messages as they are sent
    #[default]
    Text,
    /// Messages on stderr, a JSON document on stdout
    Json,
}

/// Print a value as JSON when asked; text mode already printed its messages
pub fn print<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    if let Some(json) = render(value, format)? {
        println!("{}", json);
    }
    Ok(())
}

/// The document `print` writes to stdout, if any
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<Option<String>> {
    match format {
        OutputFormat::Text => Ok(None),
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(Some)
            .context("failed to serialize output"),
    }
}

/// Exit status for a finished run: success only when the script ran to exit
pub fn exit_code(result: &ExecutionResult) -> ExitCode {
    match result.outcome {
        Outcome::Completed { .. } => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
