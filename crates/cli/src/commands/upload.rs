// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pyhost upload <script> [-r FILE] [-e FILE]` - Host a script and run it
//!
//! Drives the same upload conversation a chat operator would: script first,
//! then a yes/no answer (and file) for requirements, then for the env file.

use crate::adapters::{make_runtime, CliRuntime};
use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use pyhost_core::{Choice, ExecutionResult, HostConfig, UploadState};
use pyhost_engine::RuntimeError;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Args)]
pub struct UploadArgs {
    /// Script to host
    pub script: PathBuf,

    /// Dependency manifest installed before the run
    #[arg(short, long, value_name = "FILE")]
    pub requirements: Option<PathBuf>,

    /// KEY=VALUE file injected into the run's environment
    #[arg(short, long, value_name = "FILE")]
    pub env: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

/// A local file about to be uploaded
struct Upload {
    file_name: String,
    content: Vec<u8>,
}

impl Upload {
    fn read(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("not a file: {}", path.display()))?;
        let content =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Self { file_name, content })
    }
}

pub async fn handle(args: UploadArgs, host: HostConfig, identity: &str) -> Result<ExitCode> {
    let script = Upload::read(&args.script)?;
    let requirements = args.requirements.as_deref().map(Upload::read).transpose()?;
    let env = args.env.as_deref().map(Upload::read).transpose()?;

    let runtime = make_runtime(host, args.output);
    match converse(&runtime, identity, script, requirements, env).await {
        Ok(Some(result)) => {
            output::print(&result, args.output)?;
            Ok(output::exit_code(&result))
        }
        // An upload was rejected; the operator has seen why
        Ok(None) => Ok(ExitCode::FAILURE),
        Err(e) => super::refused(e),
    }
}

async fn converse(
    runtime: &CliRuntime,
    identity: &str,
    script: Upload,
    requirements: Option<Upload>,
    env: Option<Upload>,
) -> Result<Option<ExecutionResult>, RuntimeError> {
    runtime.start_session(identity).await?;

    runtime
        .submit_document(identity, &script.file_name, script.content)
        .await?;
    if !reached(runtime, identity, UploadState::AwaitingRequirementsChoice) {
        return abandon(runtime, identity).await;
    }

    match requirements {
        Some(manifest) => {
            runtime.submit_choice(identity, Choice::Yes).await?;
            runtime
                .submit_document(identity, &manifest.file_name, manifest.content)
                .await?;
        }
        None => {
            runtime.submit_choice(identity, Choice::No).await?;
        }
    }
    if !reached(runtime, identity, UploadState::AwaitingEnvChoice) {
        return abandon(runtime, identity).await;
    }

    match env {
        Some(env) => {
            runtime.submit_choice(identity, Choice::Yes).await?;
            runtime
                .submit_document(identity, &env.file_name, env.content)
                .await
        }
        None => runtime.submit_choice(identity, Choice::No).await,
    }
}

fn reached(runtime: &CliRuntime, identity: &str, state: UploadState) -> bool {
    runtime.session_state(identity) == Some(state)
}

async fn abandon(
    runtime: &CliRuntime,
    identity: &str,
) -> Result<Option<ExecutionResult>, RuntimeError> {
    runtime.submit_cancel(identity).await?;
    Ok(None)
}
