// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime factory for CLI commands

use crate::output::OutputFormat;
use async_trait::async_trait;
use pyhost_adapters::{
    LocalProcessRunner, NotifyAdapter, NotifyError, SingleOperator, TracedNotifyAdapter,
    TracedProcessRunner,
};
use pyhost_core::{env, HostConfig, UuidTokens};
use pyhost_engine::{Runtime, RuntimeConfig, RuntimeDeps};
use std::io::Write;

/// Production runtime as driven from the command line
pub type CliRuntime = Runtime<
    TracedProcessRunner<LocalProcessRunner>,
    TracedNotifyAdapter<ConsoleNotifyAdapter>,
    SingleOperator,
    UuidTokens,
>;

/// Create a runtime with real adapters
pub fn make_runtime(host: HostConfig, format: OutputFormat) -> CliRuntime {
    let access = SingleOperator::new(host.operator.clone());
    Runtime::new(
        RuntimeDeps {
            runner: TracedProcessRunner::new(LocalProcessRunner::new()),
            notify: TracedNotifyAdapter::new(ConsoleNotifyAdapter::for_format(format)),
            access,
        },
        UuidTokens,
        RuntimeConfig {
            host,
            ambient: env::ambient(),
        },
    )
}

/// Prints operator messages to the terminal.
///
/// In JSON mode messages go to stderr so stdout carries only the document.
#[derive(Clone, Copy)]
pub struct ConsoleNotifyAdapter {
    to_stderr: bool,
}

impl ConsoleNotifyAdapter {
    pub fn for_format(format: OutputFormat) -> Self {
        Self {
            to_stderr: matches!(format, OutputFormat::Json),
        }
    }
}

#[async_trait]
impl NotifyAdapter for ConsoleNotifyAdapter {
    async fn send(&self, _identity: &str, message: &str) -> Result<(), NotifyError> {
        let text = message.trim_end_matches('\n');
        let written = if self.to_stderr {
            writeln!(std::io::stderr().lock(), "{}", text)
        } else {
            writeln!(std::io::stdout().lock(), "{}", text)
        };
        written.map_err(|e| NotifyError::SendFailed(e.to_string()))
    }
}
