// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects produced by the upload state machine
//!
//! State machines never touch the filesystem or the chat transport. They
//! return effects, and the controller executes them in order.

use crate::artifact::{ArtifactRole, ArtifactSet};
use std::path::PathBuf;

/// Side effects the controller performs on behalf of the state machine
#[derive(Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a message to the session's identity
    Notify { message: String },
    /// Write an uploaded file into the artifact directory
    Save {
        role: ArtifactRole,
        dir: PathBuf,
        file_name: String,
        content: Vec<u8>,
    },
    /// Drop an in-progress artifact directory
    Discard { dir: PathBuf },
    /// Hand the completed artifact set to the execution engine
    Execute { artifacts: ArtifactSet },
}

impl Effect {
    pub fn notify(message: impl Into<String>) -> Self {
        Effect::Notify {
            message: message.into(),
        }
    }

    /// Effect name for log spans
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Notify { .. } => "notify",
            Effect::Save { .. } => "save",
            Effect::Discard { .. } => "discard",
            Effect::Execute { .. } => "execute",
        }
    }
}

// Uploaded bodies can be large; log their size, not their bytes.
impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::Notify { message } => f.debug_struct("Notify").field("message", message).finish(),
            Effect::Save {
                role,
                dir,
                file_name,
                content,
            } => f
                .debug_struct("Save")
                .field("role", role)
                .field("dir", dir)
                .field("file_name", file_name)
                .field("bytes", &content.len())
                .finish(),
            Effect::Discard { dir } => f.debug_struct("Discard").field("dir", dir).finish(),
            Effect::Execute { artifacts } => f
                .debug_struct("Execute")
                .field("script", &artifacts.script_path)
                .finish(),
        }
    }
}
