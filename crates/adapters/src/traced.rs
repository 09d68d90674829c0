// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::notify::{NotifyAdapter, NotifyError};
use crate::process::{ProcessError, ProcessOutput, ProcessRunner, ProcessSpec};
use async_trait::async_trait;
use tracing::Instrument;

/// Wrapper that adds tracing to any ProcessRunner
#[derive(Clone)]
pub struct TracedProcessRunner<P> {
    inner: P,
}

impl<P> TracedProcessRunner<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: ProcessRunner> ProcessRunner for TracedProcessRunner<P> {
    async fn run(&self, spec: &ProcessSpec) -> Result<ProcessOutput, ProcessError> {
        let span = tracing::info_span!(
            "process.run",
            program = %spec.program,
            cwd = %spec.cwd.display()
        );

        async move {
            tracing::info!(
                args = ?spec.args,
                env_count = spec.env.len(),
                timeout_s = spec.timeout.as_secs(),
                "starting"
            );

            // Precondition: cwd must exist
            if !spec.cwd.is_dir() {
                tracing::error!("working directory does not exist");
                return Err(ProcessError::Spawn {
                    program: spec.program.clone(),
                    message: format!("working directory does not exist: {}", spec.cwd.display()),
                });
            }

            let start = std::time::Instant::now();
            let result = self.inner.run(spec).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(output) => tracing::info!(
                    exit_code = ?output.exit_code,
                    stdout_bytes = output.stdout.len(),
                    stderr_bytes = output.stderr.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "exited"
                ),
                Err(ProcessError::TimedOut(after)) => tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    after_s = after.as_secs(),
                    "deadline exceeded, child killed"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "run failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any NotifyAdapter
#[derive(Clone)]
pub struct TracedNotifyAdapter<N> {
    inner: N,
}

impl<N> TracedNotifyAdapter<N> {
    pub fn new(inner: N) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<N: NotifyAdapter> NotifyAdapter for TracedNotifyAdapter<N> {
    async fn send(&self, identity: &str, message: &str) -> Result<(), NotifyError> {
        let span = tracing::info_span!("notify.send", identity);

        async move {
            tracing::debug!(message_len = message.len(), "sending");
            let result = self.inner.send(identity, message).await;

            match &result {
                Ok(()) => tracing::debug!("sent"),
                Err(e) => tracing::warn!(error = %e, "send failed"),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
