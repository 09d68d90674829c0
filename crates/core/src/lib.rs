// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pyhost-core: pure building blocks for the script host
//!
//! This crate provides:
//! - Host configuration
//! - Artifact layout (where a hosted script's files live)
//! - The upload state machine and the effects it produces
//! - Environment construction for script runs
//! - Execution results, output capping and operator-facing messages

pub mod config;
pub mod id;

pub mod artifact;
pub mod effect;
pub mod env;
pub mod message;
pub mod outcome;
pub mod template;
pub mod upload;

// Re-exports
pub use artifact::{
    normalize_name, ArtifactLayout, ArtifactRole, ArtifactSet, NameError, ResolvedScript,
};
pub use config::{ConfigError, ExecMode, ExecutionConfig, HostConfig};
pub use effect::Effect;
pub use env::{build_env, ProcessEnv};
pub use id::{SequentialTokens, TokenGen, UuidTokens};
pub use outcome::{truncate, ExecutionResult, Outcome, OutputLimits, TRUNCATION_MARKER};
pub use template::CommandLine;
pub use upload::{Choice, UploadInput, UploadRules, UploadSession, UploadState};
