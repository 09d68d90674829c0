//! CLI help specs
//!
//! Verify the command surface is discoverable.

use crate::prelude::*;

#[test]
fn help_lists_every_command() {
    let temp = Project::empty();
    temp.pyhost()
        .args(&["--help"])
        .passes()
        .stdout_has("upload")
        .stdout_has("run")
        .stdout_has("list");
}

#[test]
fn upload_help_names_optional_files() {
    let temp = Project::empty();
    temp.pyhost()
        .args(&["upload", "--help"])
        .passes()
        .stdout_has("--requirements")
        .stdout_has("--env");
}

#[test]
fn missing_command_is_a_usage_error() {
    let temp = Project::empty();
    temp.pyhost().fails().stderr_has("Usage");
}
