// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Child process adapters

mod local;

pub use local::LocalProcessRunner;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeProcessRunner, FakeResponse, ProcessCall};

use async_trait::async_trait;
use pyhost_core::{CommandLine, ProcessEnv};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors from running a child process
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    #[error("failed to start {program}: {message}")]
    Spawn { program: String, message: String },
    #[error("timed out after {}s", .0.as_secs())]
    TimedOut(Duration),
    #[error("io error while supervising child: {0}")]
    Io(String),
}

/// Everything needed to launch one child process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// Complete environment; the child inherits nothing else
    pub env: ProcessEnv,
    pub timeout: Duration,
}

impl ProcessSpec {
    pub fn new(command: CommandLine, cwd: impl Into<PathBuf>, env: ProcessEnv, timeout: Duration) -> Self {
        Self {
            program: command.program,
            args: command.args,
            cwd: cwd.into(),
            env,
            timeout,
        }
    }
}

/// Output of a child that exited before its deadline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the child was ended by a signal
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Adapter for running child processes under a deadline
#[async_trait]
pub trait ProcessRunner: Clone + Send + Sync + 'static {
    /// Run a child to completion, capturing both output streams.
    ///
    /// On deadline expiry the child and its process group are killed before
    /// this returns, and [`ProcessError::TimedOut`] is reported.
    async fn run(&self, spec: &ProcessSpec) -> Result<ProcessOutput, ProcessError>;
}
