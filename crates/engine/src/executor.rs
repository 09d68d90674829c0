// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Script executor: install dependencies, run under a deadline, clean up

use pyhost_adapters::{NotifyAdapter, ProcessError, ProcessRunner, ProcessSpec};
use pyhost_core::{
    build_env, message, truncate, ArtifactSet, CommandLine, ExecMode, ExecutionResult, HostConfig,
    OutputLimits, ProcessEnv,
};
use pyhost_storage::ArtifactStore;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

/// Settings the executor needs from the host configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorConfig {
    pub mode: ExecMode,
    pub interpreter: Vec<String>,
    pub installer: Vec<String>,
    pub search_path_var: String,
    pub run_timeout: Duration,
    pub install_timeout: Duration,
    pub limits: OutputLimits,
}

impl From<&HostConfig> for ExecutorConfig {
    fn from(config: &HostConfig) -> Self {
        let exec = &config.execution;
        Self {
            mode: config.mode,
            interpreter: exec.interpreter.clone(),
            installer: exec.installer.clone(),
            search_path_var: exec.search_path_var.clone(),
            run_timeout: config.run_timeout(),
            install_timeout: exec.install_timeout,
            limits: OutputLimits {
                stdout: exec.stdout_limit,
                stderr: exec.stderr_limit,
            },
        }
    }
}

/// Runs one artifact set to an [`ExecutionResult`]
#[derive(Clone)]
pub struct Executor<P, N> {
    runner: P,
    notify: N,
    store: ArtifactStore,
    config: Arc<ExecutorConfig>,
    /// Environment every child starts from
    ambient: Arc<ProcessEnv>,
}

impl<P, N> Executor<P, N>
where
    P: ProcessRunner,
    N: NotifyAdapter,
{
    pub fn new(
        runner: P,
        notify: N,
        store: ArtifactStore,
        config: ExecutorConfig,
        ambient: ProcessEnv,
    ) -> Self {
        Self {
            runner,
            notify,
            store,
            config: Arc::new(config),
            ambient: Arc::new(ambient),
        }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Run `artifacts` for `identity`.
    ///
    /// Never fails: every problem becomes an outcome. In ephemeral mode the
    /// artifact directory is removed afterwards whatever the outcome.
    pub async fn run(&self, identity: &str, artifacts: &ArtifactSet) -> ExecutionResult {
        let span = tracing::info_span!(
            "run",
            identity,
            script = %artifacts.script_name,
            mode = self.config.mode.name()
        );

        async move {
            let start = std::time::Instant::now();
            let result = self.run_inner(identity, artifacts).await;

            if self.config.mode == ExecMode::Ephemeral {
                let _cleanup = tracing::info_span!("cleanup", dir = %artifacts.dir.display()).entered();
                self.store.remove_tree(&artifacts.dir);
            }

            tracing::info!(
                outcome = result.outcome.name(),
                stdout_truncated = result.stdout_truncated,
                stderr_truncated = result.stderr_truncated,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "run finished"
            );
            result
        }
        .instrument(span)
        .await
    }

    async fn run_inner(&self, identity: &str, artifacts: &ArtifactSet) -> ExecutionResult {
        let name = artifacts.script_name.as_str();
        if !self.store.exists(&artifacts.script_path) {
            return ExecutionResult::error(
                name,
                format!("script file missing: {}", artifacts.script_path.display()),
            );
        }

        if let Some(requirements) = &artifacts.requirements_path {
            if let Err(detail) = self.install(identity, artifacts, requirements).await {
                return ExecutionResult::install_failed(name, detail);
            }
        }

        let env = build_env(
            &self.ambient,
            &self.config.search_path_var,
            &artifacts.deps_cache_path,
            artifacts.env_path.as_deref(),
        );
        let Some(command) = CommandLine::expand(&self.config.interpreter, &placeholders(artifacts))
        else {
            return ExecutionResult::error(name, "interpreter command is empty");
        };

        let spec = ProcessSpec::new(command, &artifacts.dir, env, self.config.run_timeout);
        let result = self
            .runner
            .run(&spec)
            .instrument(tracing::info_span!("execute"))
            .await;

        match result {
            Ok(output) => ExecutionResult::completed(
                name,
                output.exit_code,
                output.stdout_text(),
                output.stderr_text(),
                self.config.limits,
            ),
            Err(ProcessError::TimedOut(after)) => ExecutionResult::timed_out(name, after),
            Err(e) => ExecutionResult::error(name, e.to_string()),
        }
    }

    /// Populate the dependency cache from the manifest.
    ///
    /// Persistent mode trusts an existing cache directory and skips the
    /// installer. A failed install leaves no cache behind.
    async fn install(
        &self,
        identity: &str,
        artifacts: &ArtifactSet,
        requirements: &Path,
    ) -> Result<(), String> {
        let cache = &artifacts.deps_cache_path;
        let span = tracing::info_span!("install", requirements = %requirements.display());

        async move {
            if self.config.mode == ExecMode::Persistent && self.store.exists(cache) {
                tracing::debug!("dependency cache present, skipping install");
                return Ok(());
            }

            if let Err(e) = self.notify.send(identity, message::INSTALLING).await {
                tracing::warn!(error = %e, "progress notification failed");
            }

            self.store.create_dir(cache).map_err(|e| e.to_string())?;

            let outcome = self.run_installer(artifacts).await;
            if let Err(detail) = &outcome {
                tracing::warn!(detail, "dependency install failed");
                self.store.remove_tree(cache);
            }
            outcome
        }
        .instrument(span)
        .await
    }

    async fn run_installer(&self, artifacts: &ArtifactSet) -> Result<(), String> {
        let command = CommandLine::expand(&self.config.installer, &placeholders(artifacts))
            .ok_or_else(|| "installer command is empty".to_string())?;
        let spec = ProcessSpec::new(
            command,
            &artifacts.dir,
            (*self.ambient).clone(),
            self.config.install_timeout,
        );

        match self.runner.run(&spec).await {
            Ok(output) if output.success() => Ok(()),
            Ok(output) => {
                let mut detail = output.stderr_text().trim().to_string();
                if detail.is_empty() {
                    detail = output.stdout_text().trim().to_string();
                }
                if detail.is_empty() {
                    detail = match output.exit_code {
                        Some(code) => format!("installer exited with code {}", code),
                        None => "installer was killed by a signal".to_string(),
                    };
                }
                Err(truncate(detail, self.config.limits.stderr).text)
            }
            Err(ProcessError::TimedOut(after)) => Err(format!(
                "installer ran longer than {}s",
                after.as_secs()
            )),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Values for `{script}`, `{requirements}` and `{deps}` in command templates
fn placeholders(artifacts: &ArtifactSet) -> HashMap<&'static str, String> {
    let mut vars = HashMap::new();
    vars.insert("script", artifacts.script_path.display().to_string());
    vars.insert(
        "requirements",
        artifacts
            .requirements_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
    );
    vars.insert("deps", artifacts.deps_cache_path.display().to_string());
    vars
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
