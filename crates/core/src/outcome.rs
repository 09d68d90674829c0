// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution results and output capping

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Appended to captured text that was cut to fit its budget
pub const TRUNCATION_MARKER: &str = "... (truncated)";

/// Captured text after applying a character budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub text: String,
    pub truncated: bool,
}

/// Cut `text` to at most `limit` characters, marking the cut.
///
/// Text within the budget is returned unmodified.
pub fn truncate(text: String, limit: usize) -> Captured {
    match text.char_indices().nth(limit) {
        None => Captured {
            text,
            truncated: false,
        },
        Some((cut, _)) => {
            let mut head = text;
            head.truncate(cut);
            head.push_str(TRUNCATION_MARKER);
            Captured {
                text: head,
                truncated: true,
            }
        }
    }
}

/// Character budgets for captured streams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputLimits {
    pub stdout: usize,
    pub stderr: usize,
}

/// How an engine invocation ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// The script ran to exit; its own exit code is informational only
    Completed { exit_code: Option<i32> },
    /// The deadline fired and the script was killed
    TimedOut {
        #[serde(with = "humantime_serde")]
        after: Duration,
    },
    /// The dependency installer failed; the script never ran
    DependencyInstallFailed { detail: String },
    /// The script could not be launched or supervised
    ExecutionError { detail: String },
}

impl Outcome {
    pub fn name(&self) -> &'static str {
        match self {
            Outcome::Completed { .. } => "completed",
            Outcome::TimedOut { .. } => "timed_out",
            Outcome::DependencyInstallFailed { .. } => "dependency_install_failed",
            Outcome::ExecutionError { .. } => "execution_error",
        }
    }
}

/// Result of one engine invocation, owned by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub script_name: String,
    pub outcome: Outcome,
    pub stdout: String,
    pub stderr: String,
    #[serde(default)]
    pub stdout_truncated: bool,
    #[serde(default)]
    pub stderr_truncated: bool,
}

impl ExecutionResult {
    /// A finished run, with each stream capped to its budget
    pub fn completed(
        script_name: impl Into<String>,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        limits: OutputLimits,
    ) -> Self {
        let stdout = truncate(stdout, limits.stdout);
        let stderr = truncate(stderr, limits.stderr);
        Self {
            script_name: script_name.into(),
            outcome: Outcome::Completed { exit_code },
            stdout: stdout.text,
            stderr: stderr.text,
            stdout_truncated: stdout.truncated,
            stderr_truncated: stderr.truncated,
        }
    }

    /// A killed run; nothing buffered before the kill is reported
    pub fn timed_out(script_name: impl Into<String>, after: Duration) -> Self {
        Self::without_output(script_name, Outcome::TimedOut { after })
    }

    pub fn install_failed(script_name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::without_output(
            script_name,
            Outcome::DependencyInstallFailed {
                detail: detail.into(),
            },
        )
    }

    pub fn error(script_name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::without_output(
            script_name,
            Outcome::ExecutionError {
                detail: detail.into(),
            },
        )
    }

    fn without_output(script_name: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            script_name: script_name.into(),
            outcome,
            stdout: String::new(),
            stderr: String::new(),
            stdout_truncated: false,
            stderr_truncated: false,
        }
    }

    /// A completed run that printed nothing on either stream
    pub fn is_silent(&self) -> bool {
        matches!(self.outcome, Outcome::Completed { .. })
            && self.stdout.is_empty()
            && self.stderr.is_empty()
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
