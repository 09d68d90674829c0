// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator-facing message text

use crate::artifact::NameError;
use crate::outcome::{ExecutionResult, Outcome};
use crate::upload::UploadState;

pub const REQUIREMENTS_QUESTION: &str = "Do you have a requirements.txt file? (yes/no)";
pub const REQUIREMENTS_PROMPT: &str = "Please upload requirements.txt.";
pub const ENV_QUESTION: &str = "Do you have a .env file? (yes/no)";
pub const ENV_PROMPT: &str = "Please upload .env.";
pub const SETUP_COMPLETE: &str = "Setup complete. Running script...";
pub const RUN_IN_PROGRESS: &str = "A run is already in progress for this session.";
pub const CANCELLED: &str = "Cancelled.";
pub const ACCESS_DENIED: &str = "Access denied.";
pub const NO_SESSION: &str = "No upload in progress. Start one first.";
pub const INSTALLING: &str = "First time setup: installing requirements...";
pub const NO_SCRIPTS: &str = "No scripts hosted yet.";
pub const ANSWER_YES_NO: &str = "Please answer yes or no.";

pub fn script_prompt(extension: &str) -> String {
    format!(
        "Host new script: please upload your .{} file. It is kept so you can re-run it later.",
        extension
    )
}

pub fn script_rejected(extension: &str) -> String {
    format!("Please upload a file ending in .{}", extension)
}

pub fn requirements_rejected(extension: &str) -> String {
    format!(
        "Please upload a .{} dependency manifest.",
        extension.trim_start_matches('.')
    )
}

pub fn invalid_name(err: &NameError) -> String {
    format!("Cannot store that file: {}", err)
}

pub fn script_saved(name: &str) -> String {
    format!("Saved {}.\n\n{}", name, REQUIREMENTS_QUESTION)
}

pub fn executing(name: &str) -> String {
    format!("Executing {}...", name)
}

pub fn not_found(name: &str) -> String {
    format!(
        "File {} not found in your storage. Upload it first.",
        name
    )
}

pub fn store_failed(err: &impl std::fmt::Display) -> String {
    format!("Could not store the file: {}", err)
}

/// Re-prompt for whatever the current state is waiting on
pub fn expected_input(state: UploadState, script_extension: &str) -> String {
    match state {
        UploadState::AwaitingScript => script_rejected(script_extension),
        UploadState::AwaitingRequirementsChoice | UploadState::AwaitingEnvChoice => {
            ANSWER_YES_NO.to_string()
        }
        UploadState::AwaitingRequirements => REQUIREMENTS_PROMPT.to_string(),
        UploadState::AwaitingEnv => ENV_PROMPT.to_string(),
        UploadState::Ready => RUN_IN_PROGRESS.to_string(),
        UploadState::Cancelled => CANCELLED.to_string(),
    }
}

/// List of hosted scripts, one re-runnable name per line
pub fn hosted_scripts(names: &[String], script_extension: &str) -> String {
    if names.is_empty() {
        return NO_SCRIPTS.to_string();
    }
    let mut msg = String::from("Hosted scripts:\n");
    for name in names {
        msg.push_str(&format!("  {}.{}\n", name, script_extension));
    }
    msg
}

/// The single terminal message for a run
pub fn result(result: &ExecutionResult) -> String {
    let name = &result.script_name;
    match &result.outcome {
        Outcome::Completed { .. } => {
            let mut msg = format!("Output for {}:\n", name);
            if !result.stdout.is_empty() {
                msg.push_str(&result.stdout);
                if !result.stdout.ends_with('\n') {
                    msg.push('\n');
                }
            }
            if !result.stderr.is_empty() {
                msg.push_str("Errors:\n");
                msg.push_str(&result.stderr);
                if !result.stderr.ends_with('\n') {
                    msg.push('\n');
                }
            }
            if result.is_silent() {
                msg.push_str("(No Output)\n");
            }
            msg
        }
        Outcome::TimedOut { after } => {
            format!("Timeout: {} ran longer than {}s.", name, after.as_secs())
        }
        Outcome::DependencyInstallFailed { detail } => {
            format!("Failed to install requirements: {}", detail)
        }
        Outcome::ExecutionError { detail } => format!("Error: {}", detail),
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
