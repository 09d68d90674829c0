// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake process runner for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ProcessError, ProcessOutput, ProcessRunner, ProcessSpec};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Recorded process launch
#[derive(Debug, Clone)]
pub struct ProcessCall {
    pub spec: ProcessSpec,
}

impl ProcessCall {
    pub fn program(&self) -> &str {
        &self.spec.program
    }
}

/// Scripted reply for a program
#[derive(Debug, Clone)]
pub enum FakeResponse {
    Exit {
        code: i32,
        stdout: String,
        stderr: String,
    },
    TimeOut,
    SpawnError(String),
}

impl FakeResponse {
    pub fn ok(stdout: impl Into<String>) -> Self {
        FakeResponse::Exit {
            code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn fail(code: i32, stderr: impl Into<String>) -> Self {
        FakeResponse::Exit {
            code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

#[derive(Default)]
struct FakeState {
    calls: Vec<ProcessCall>,
    responses: HashMap<String, FakeResponse>,
}

/// Fake process runner that answers by program name.
///
/// Programs without a scripted response exit 0 with no output.
#[derive(Clone, Default)]
pub struct FakeProcessRunner {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the reply for every launch of `program`
    pub fn respond(&self, program: &str, response: FakeResponse) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .responses
            .insert(program.to_string(), response);
    }

    /// Get all recorded launches
    pub fn calls(&self) -> Vec<ProcessCall> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Programs launched, in order
    pub fn programs(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.spec.program.clone()).collect()
    }
}

#[async_trait]
impl ProcessRunner for FakeProcessRunner {
    async fn run(&self, spec: &ProcessSpec) -> Result<ProcessOutput, ProcessError> {
        let response = {
            let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            state.calls.push(ProcessCall { spec: spec.clone() });
            state.responses.get(&spec.program).cloned()
        };

        match response {
            None => Ok(ProcessOutput {
                exit_code: Some(0),
                ..ProcessOutput::default()
            }),
            Some(FakeResponse::Exit {
                code,
                stdout,
                stderr,
            }) => Ok(ProcessOutput {
                exit_code: Some(code),
                stdout: stdout.into_bytes(),
                stderr: stderr.into_bytes(),
            }),
            Some(FakeResponse::TimeOut) => Err(ProcessError::TimedOut(spec.timeout)),
            Some(FakeResponse::SpawnError(message)) => Err(ProcessError::Spawn {
                program: spec.program.clone(),
                message,
            }),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
