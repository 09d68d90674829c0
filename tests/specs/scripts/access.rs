//! Access control specs
//!
//! Verify only the configured operator can use the host.

use crate::prelude::*;

#[test]
fn other_identity_is_denied_upload() {
    let temp = Project::empty();
    temp.file("hello.sh", "echo hi\n");

    temp.pyhost()
        .args(&["--identity", "7", "upload", "hello.sh"])
        .fails()
        .stdout_has("Access denied.")
        .stdout_lacks("hi");

    assert!(!temp.hosted().exists());
}

#[test]
fn other_identity_is_denied_run_and_list() {
    let temp = Project::empty();
    temp.file("hello.sh", "echo hi\n");
    temp.pyhost().args(&["upload", "hello.sh"]).passes();

    temp.pyhost()
        .env("PYHOST_IDENTITY", "7")
        .args(&["run", "hello"])
        .fails()
        .stdout_has("Access denied.");
    temp.pyhost()
        .env("PYHOST_IDENTITY", "7")
        .args(&["list"])
        .fails()
        .stdout_has("Access denied.");
}

#[test]
fn no_operator_means_nobody_is_admitted() {
    let temp = Project::empty();
    temp.file("open.toml", "[execution]\nscript_extension = \"sh\"\n");
    temp.file("hello.sh", "echo hi\n");

    temp.pyhost()
        .env("PYHOST_CONFIG", "open.toml")
        .args(&["upload", "hello.sh"])
        .fails()
        .stdout_has("Access denied.");
}
