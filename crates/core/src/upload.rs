// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Upload state machine
//!
//! Collects a script, an optional dependency manifest and an optional
//! environment file, in that order, before execution:
//!
//! ```text
//! AwaitingScript
//!   └─ script ─► AwaitingRequirementsChoice
//!                  ├─ yes ─► AwaitingRequirements ─ manifest ─┐
//!                  └─ no ────────────────────────────────────►┴► AwaitingEnvChoice
//!                                                                  ├─ yes ─► AwaitingEnv ─ env ─┐
//!                                                                  └─ no ──────────────────────►┴► Ready
//! ```
//!
//! Cancel is accepted from every non-terminal state. Anything else that does
//! not fit the current state is rejected with a message and the state does
//! not change.

use crate::artifact::{ArtifactLayout, ArtifactRole, ArtifactSet};
use crate::config::ExecMode;
use crate::effect::Effect;
use crate::message;
use std::path::Path;

/// Where an upload session is in the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    AwaitingScript,
    AwaitingRequirementsChoice,
    AwaitingRequirements,
    AwaitingEnvChoice,
    AwaitingEnv,
    Ready,
    Cancelled,
}

impl UploadState {
    pub fn name(&self) -> &'static str {
        match self {
            UploadState::AwaitingScript => "awaiting_script",
            UploadState::AwaitingRequirementsChoice => "awaiting_requirements_choice",
            UploadState::AwaitingRequirements => "awaiting_requirements",
            UploadState::AwaitingEnvChoice => "awaiting_env_choice",
            UploadState::AwaitingEnv => "awaiting_env",
            UploadState::Ready => "ready",
            UploadState::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadState::Ready | UploadState::Cancelled)
    }
}

/// Answer to a yes/no prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Yes,
    No,
}

impl std::str::FromStr for Choice {
    type Err = String;

    /// Accepts `yes`/`no`, `y`/`n`, and button tokens such as `req_yes`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        let answer = token.rsplit('_').next().unwrap_or_default();
        match answer {
            "yes" | "y" => Ok(Choice::Yes),
            "no" | "n" => Ok(Choice::No),
            _ => Err(s.to_string()),
        }
    }
}

/// Inputs accepted by the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadInput {
    Document { file_name: String, content: Vec<u8> },
    Choice(Choice),
    Cancel,
}

/// Per-host rules the state machine validates uploads against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRules {
    pub layout: ArtifactLayout,
    /// Extension required of a manifest upload; empty accepts any file
    pub requirements_extension: String,
}

impl UploadRules {
    fn accepts_requirements(&self, file_name: &str) -> bool {
        let wanted = self.requirements_extension.trim_start_matches('.');
        wanted.is_empty()
            || Path::new(file_name)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
    }
}

/// One operator's in-progress upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSession {
    pub identity: String,
    /// Session token; names the artifact directory in ephemeral mode
    pub token: Option<String>,
    pub state: UploadState,
    pub artifacts: Option<ArtifactSet>,
    rules: UploadRules,
}

impl UploadSession {
    /// Start a session and prompt for the script
    pub fn start(
        identity: impl Into<String>,
        token: Option<String>,
        rules: UploadRules,
    ) -> (UploadSession, Vec<Effect>) {
        let prompt = message::script_prompt(rules.layout.script_extension());
        (
            UploadSession {
                identity: identity.into(),
                token,
                state: UploadState::AwaitingScript,
                artifacts: None,
                rules,
            },
            vec![Effect::notify(prompt)],
        )
    }

    /// Pure transition function - returns new state and effects
    pub fn transition(&self, input: UploadInput) -> (UploadSession, Vec<Effect>) {
        match (self.state, input) {
            (state, UploadInput::Cancel) if !state.is_terminal() => self.cancel(),

            (UploadState::AwaitingScript, UploadInput::Document { file_name, content }) => {
                self.accept_script(&file_name, content)
            }

            (
                UploadState::AwaitingRequirementsChoice,
                UploadInput::Choice(Choice::Yes),
            ) => (
                self.with_state(UploadState::AwaitingRequirements),
                vec![Effect::notify(message::REQUIREMENTS_PROMPT)],
            ),
            (UploadState::AwaitingRequirementsChoice, UploadInput::Choice(Choice::No)) => (
                self.with_state(UploadState::AwaitingEnvChoice),
                vec![Effect::notify(message::ENV_QUESTION)],
            ),

            (UploadState::AwaitingRequirements, UploadInput::Document { file_name, content }) => {
                if !self.rules.accepts_requirements(&file_name) {
                    return self.reject(message::requirements_rejected(
                        &self.rules.requirements_extension,
                    ));
                }
                self.store(ArtifactRole::Requirements, content, UploadState::AwaitingEnvChoice)
            }

            (UploadState::AwaitingEnvChoice, UploadInput::Choice(Choice::Yes)) => (
                self.with_state(UploadState::AwaitingEnv),
                vec![Effect::notify(message::ENV_PROMPT)],
            ),
            (UploadState::AwaitingEnvChoice, UploadInput::Choice(Choice::No)) => self.ready(),

            (UploadState::AwaitingEnv, UploadInput::Document { content, .. }) => {
                self.store(ArtifactRole::Env, content, UploadState::Ready)
            }

            // Terminal states take no further input
            (UploadState::Ready, _) => (self.clone(), vec![Effect::notify(message::RUN_IN_PROGRESS)]),
            (UploadState::Cancelled, _) => (self.clone(), vec![]),

            // Everything else is the wrong kind of input for this state
            (state, _) => self.reject(message::expected_input(
                state,
                self.rules.layout.script_extension(),
            )),
        }
    }

    fn accept_script(&self, file_name: &str, content: Vec<u8>) -> (UploadSession, Vec<Effect>) {
        let layout = &self.rules.layout;
        if !layout.is_script_name(file_name) {
            return self.reject(message::script_rejected(layout.script_extension()));
        }
        let resolved = match layout.resolve_upload(&self.identity, self.token.as_deref(), file_name)
        {
            Ok(resolved) => resolved,
            Err(e) => return self.reject(message::invalid_name(&e)),
        };

        let artifacts = ArtifactSet::new(&resolved);
        let effects = vec![
            Effect::Save {
                role: ArtifactRole::Script,
                dir: artifacts.dir.clone(),
                file_name: artifacts.script_name.clone(),
                content,
            },
            Effect::notify(message::script_saved(&artifacts.script_name)),
        ];
        let session = UploadSession {
            state: UploadState::AwaitingRequirementsChoice,
            artifacts: Some(artifacts),
            ..self.clone()
        };
        (session, effects)
    }

    /// Persist an optional artifact and move to `next`
    fn store(
        &self,
        role: ArtifactRole,
        content: Vec<u8>,
        next: UploadState,
    ) -> (UploadSession, Vec<Effect>) {
        // Optional artifacts are only reachable after the script was accepted
        let Some(artifacts) = self.artifacts.clone() else {
            return self.reject(message::expected_input(
                UploadState::AwaitingScript,
                self.rules.layout.script_extension(),
            ));
        };
        let artifacts = artifacts.with_artifact(role);
        let save = Effect::Save {
            role,
            dir: artifacts.dir.clone(),
            file_name: artifacts.file_name_for(role),
            content,
        };
        let session = UploadSession {
            artifacts: Some(artifacts),
            ..self.clone()
        };

        let (session, mut effects) = if next == UploadState::Ready {
            session.ready()
        } else {
            (
                session.with_state(next),
                vec![Effect::notify(message::ENV_QUESTION)],
            )
        };
        effects.insert(0, save);
        (session, effects)
    }

    fn ready(&self) -> (UploadSession, Vec<Effect>) {
        let Some(artifacts) = self.artifacts.clone() else {
            return self.reject(message::expected_input(
                UploadState::AwaitingScript,
                self.rules.layout.script_extension(),
            ));
        };
        (
            self.with_state(UploadState::Ready),
            vec![
                Effect::notify(message::SETUP_COMPLETE),
                Effect::Execute { artifacts },
            ],
        )
    }

    fn cancel(&self) -> (UploadSession, Vec<Effect>) {
        let mut effects = Vec::new();
        if self.rules.layout.mode() == ExecMode::Ephemeral {
            if let Some(artifacts) = &self.artifacts {
                effects.push(Effect::Discard {
                    dir: artifacts.dir.clone(),
                });
            }
        }
        effects.push(Effect::notify(message::CANCELLED));
        let session = UploadSession {
            state: UploadState::Cancelled,
            artifacts: None,
            ..self.clone()
        };
        (session, effects)
    }

    fn reject(&self, reason: String) -> (UploadSession, Vec<Effect>) {
        (self.clone(), vec![Effect::notify(reason)])
    }

    fn with_state(&self, state: UploadState) -> UploadSession {
        UploadSession {
            state,
            ..self.clone()
        }
    }
}

#[cfg(test)]
#[path = "upload_tests.rs"]
mod tests;
