// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime: the session lifecycle controller
//!
//! Owns one upload session per identity, executes the effects the upload
//! state machine returns, and hands completed artifact sets to the executor.

use crate::error::RuntimeError;
use crate::executor::{Executor, ExecutorConfig};
use pyhost_adapters::{AccessPolicy, NotifyAdapter, ProcessRunner};
use pyhost_core::{
    message, ArtifactLayout, ArtifactSet, Choice, Effect, ExecMode, ExecutionResult, HostConfig,
    ProcessEnv, TokenGen, UploadInput, UploadRules, UploadSession, UploadState,
};
use pyhost_storage::{ArtifactStore, StoreError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::Instrument;

/// Runtime configuration
pub struct RuntimeConfig {
    pub host: HostConfig,
    /// Environment every child process starts from
    pub ambient: ProcessEnv,
}

/// Runtime adapter dependencies
pub struct RuntimeDeps<P, N, A> {
    pub runner: P,
    pub notify: N,
    pub access: A,
}

/// Runtime that coordinates uploads and runs
pub struct Runtime<P, N, A, T> {
    executor: Executor<P, N>,
    notify: N,
    access: A,
    tokens: T,
    store: ArtifactStore,
    rules: UploadRules,
    /// In-progress uploads, keyed by identity
    sessions: Mutex<HashMap<String, UploadSession>>,
    /// Serializes runs per identity
    run_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl<P, N, A, T> Runtime<P, N, A, T>
where
    P: ProcessRunner,
    N: NotifyAdapter,
    A: AccessPolicy,
    T: TokenGen,
{
    /// Create a new runtime
    pub fn new(deps: RuntimeDeps<P, N, A>, tokens: T, config: RuntimeConfig) -> Self {
        let host = &config.host;
        let layout = ArtifactLayout::new(&host.root, host.mode, &host.execution.script_extension);
        let store = ArtifactStore::new(layout.clone());
        let executor = Executor::new(
            deps.runner,
            deps.notify.clone(),
            store.clone(),
            ExecutorConfig::from(host),
            config.ambient,
        );

        Self {
            executor,
            notify: deps.notify,
            access: deps.access,
            tokens,
            store,
            rules: UploadRules {
                layout,
                requirements_extension: host.execution.requirements_extension.clone(),
            },
            sessions: Mutex::new(HashMap::new()),
            run_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Current upload state for `identity`, if a session is open
    pub fn session_state(&self, identity: &str) -> Option<UploadState> {
        self.lock_sessions().get(identity).map(|s| s.state)
    }

    /// Open a fresh upload session, replacing any open one.
    ///
    /// The only entry point of the upload flow that consults access control.
    pub async fn start_session(&self, identity: &str) -> Result<(), RuntimeError> {
        self.authorize(identity).await?;

        let token = match self.rules.layout.mode() {
            ExecMode::Ephemeral => Some(self.tokens.next_token()),
            ExecMode::Persistent => None,
        };
        let (session, effects) = UploadSession::start(identity, token, self.rules.clone());
        let replaced = self
            .lock_sessions()
            .insert(identity.to_string(), session);

        if let Some(old) = replaced {
            self.abandon(old);
        }
        tracing::info!(identity, mode = self.rules.layout.mode().name(), "session started");

        self.apply(identity, effects).await?;
        Ok(())
    }

    /// Feed an uploaded file to the open session
    pub async fn submit_document(
        &self,
        identity: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<Option<ExecutionResult>, RuntimeError> {
        let input = UploadInput::Document {
            file_name: file_name.to_string(),
            content,
        };
        self.dispatch(identity, input).await
    }

    /// Answer the open session's yes/no question
    pub async fn submit_choice(
        &self,
        identity: &str,
        choice: Choice,
    ) -> Result<Option<ExecutionResult>, RuntimeError> {
        self.dispatch(identity, UploadInput::Choice(choice)).await
    }

    /// Free-text reply; anything that is not a yes/no answer re-prompts
    pub async fn submit_reply(
        &self,
        identity: &str,
        text: &str,
    ) -> Result<Option<ExecutionResult>, RuntimeError> {
        match text.parse::<Choice>() {
            Ok(choice) => self.submit_choice(identity, choice).await,
            Err(_) => {
                let Some(state) = self.session_state(identity) else {
                    return self.no_session(identity).await;
                };
                let prompt = message::expected_input(state, self.rules.layout.script_extension());
                self.say(identity, &prompt).await;
                Ok(None)
            }
        }
    }

    /// Abandon the open session
    pub async fn submit_cancel(&self, identity: &str) -> Result<(), RuntimeError> {
        self.dispatch(identity, UploadInput::Cancel).await?;
        Ok(())
    }

    /// Run a stored script again, without the upload flow.
    ///
    /// Accepts the name with or without its extension. Nothing is created
    /// when the script does not exist.
    pub async fn rerun(
        &self,
        identity: &str,
        script_name: &str,
    ) -> Result<ExecutionResult, RuntimeError> {
        self.authorize(identity).await?;

        // Ephemeral mode retains nothing between runs
        let artifacts = match self.rules.layout.mode() {
            ExecMode::Persistent => self
                .store
                .resolve(identity, script_name)
                .ok()
                .map(|resolved| ArtifactSet::discover(&resolved))
                .filter(|set| self.store.exists(&set.script_path)),
            ExecMode::Ephemeral => None,
        };
        let Some(artifacts) = artifacts else {
            tracing::info!(identity, script_name, "re-run of unknown script");
            self.say(identity, &message::not_found(script_name)).await;
            return Err(RuntimeError::NotFound(script_name.to_string()));
        };

        self.say(identity, &message::executing(&artifacts.script_name))
            .await;
        Ok(self.execute(identity, artifacts).await)
    }

    /// Names of the scripts hosted for `identity`
    pub async fn list(&self, identity: &str) -> Result<Vec<String>, RuntimeError> {
        self.authorize(identity).await?;
        let names = self.store.list(identity)?;
        let listing = message::hosted_scripts(&names, self.rules.layout.script_extension());
        self.say(identity, &listing).await;
        Ok(names)
    }

    async fn dispatch(
        &self,
        identity: &str,
        input: UploadInput,
    ) -> Result<Option<ExecutionResult>, RuntimeError> {
        // Transition and commit under one lock so concurrent inputs see each other
        let step = {
            let mut sessions = self.lock_sessions();
            sessions.get(identity).cloned().map(|previous| {
                let (next, effects) = previous.transition(input);
                if next.state == UploadState::Cancelled {
                    sessions.remove(identity);
                } else {
                    sessions.insert(identity.to_string(), next.clone());
                }
                (previous, next, effects)
            })
        };
        let Some((previous, next, effects)) = step else {
            return self.no_session(identity).await;
        };

        if previous.state != next.state {
            tracing::info!(
                identity,
                from = previous.state.name(),
                to = next.state.name(),
                "session transition"
            );
        }

        match self.apply(identity, effects).await {
            Ok(result) => Ok(result),
            Err(e) => {
                // Nothing was written, so the session stays where it was
                self.restore(identity, &next, previous);
                self.say(identity, &message::store_failed(&e)).await;
                Err(e.into())
            }
        }
    }

    /// Execute effects in order, stopping at the first failed save
    async fn apply(
        &self,
        identity: &str,
        effects: Vec<Effect>,
    ) -> Result<Option<ExecutionResult>, StoreError> {
        let mut result = None;
        for effect in effects {
            let span = tracing::info_span!("effect", effect = effect.name());
            tracing::debug!(parent: &span, ?effect, "executing");

            match effect {
                Effect::Notify { message } => {
                    self.say(identity, &message).instrument(span).await;
                }
                Effect::Save {
                    dir,
                    file_name,
                    content,
                    ..
                } => {
                    let _guard = span.enter();
                    self.store
                        .save(&dir, &file_name, &content)
                        .inspect_err(|e| {
                            tracing::error!(error = %e, "save failed");
                        })?;
                }
                Effect::Discard { dir } => {
                    let _guard = span.enter();
                    self.store.remove_tree(&dir);
                }
                Effect::Execute { artifacts } => {
                    let outcome = self
                        .execute(identity, artifacts.clone())
                        .instrument(span)
                        .await;
                    self.finish(identity, &artifacts);
                    result = Some(outcome);
                }
            }
        }
        Ok(result)
    }

    /// Run on a spawned task, one run per identity at a time, and report the
    /// result to the operator.
    async fn execute(&self, identity: &str, artifacts: ArtifactSet) -> ExecutionResult {
        let lock = self.run_lock(identity);
        let _serialized = lock.lock().await;

        let executor = self.executor.clone();
        let task_identity = identity.to_string();
        let task_artifacts = artifacts.clone();
        let handle =
            tokio::spawn(async move { executor.run(&task_identity, &task_artifacts).await });

        let result = match handle.await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(identity, error = %e, "run task failed");
                if self.rules.layout.mode() == ExecMode::Ephemeral {
                    self.store.remove_tree(&artifacts.dir);
                }
                ExecutionResult::error(&artifacts.script_name, format!("run aborted: {}", e))
            }
        };

        self.say(identity, &message::result(&result)).await;
        result
    }

    async fn authorize(&self, identity: &str) -> Result<(), RuntimeError> {
        if self.access.is_authorized(identity) {
            return Ok(());
        }
        tracing::warn!(identity, "unauthorized identity");
        self.say(identity, message::ACCESS_DENIED).await;
        Err(RuntimeError::Unauthorized(identity.to_string()))
    }

    async fn no_session<R>(&self, identity: &str) -> Result<R, RuntimeError> {
        self.say(identity, message::NO_SESSION).await;
        Err(RuntimeError::NoSession(identity.to_string()))
    }

    /// Deliver a message; delivery failures never interrupt the flow
    async fn say(&self, identity: &str, text: &str) {
        if let Err(e) = self.notify.send(identity, text).await {
            tracing::warn!(identity, error = %e, "notification failed");
        }
    }

    /// Silently drop a replaced session's uncommitted artifacts
    fn abandon(&self, old: UploadSession) {
        if old.state.is_terminal() {
            return;
        }
        let (_, effects) = old.transition(UploadInput::Cancel);
        for effect in effects {
            if let Effect::Discard { dir } = effect {
                self.store.remove_tree(&dir);
            }
        }
    }

    /// Put `previous` back if the session is still the one we committed
    fn restore(&self, identity: &str, committed: &UploadSession, previous: UploadSession) {
        let mut sessions = self.lock_sessions();
        let unchanged = match sessions.get(identity) {
            Some(current) => current == committed,
            None => committed.state == UploadState::Cancelled,
        };
        if unchanged {
            sessions.insert(identity.to_string(), previous);
        }
    }

    /// Close the session whose run just finished
    fn finish(&self, identity: &str, artifacts: &ArtifactSet) {
        let mut sessions = self.lock_sessions();
        let done = sessions.get(identity).is_some_and(|s| {
            s.state == UploadState::Ready && s.artifacts.as_ref() == Some(artifacts)
        });
        if done {
            sessions.remove(identity);
        }
    }

    fn run_lock(&self, identity: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.run_locks.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(locks.entry(identity.to_string()).or_default())
    }

    fn lock_sessions(&self) -> MutexGuard<'_, HashMap<String, UploadSession>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
