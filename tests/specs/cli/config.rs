//! Configuration specs
//!
//! Verify config file errors and flag overrides.

use crate::prelude::*;

#[test]
fn unreadable_config_is_reported() {
    let temp = Project::empty();
    temp.pyhost()
        .env("PYHOST_CONFIG", "does-not-exist.toml")
        .args(&["list"])
        .fails()
        .stderr_has("failed to load config");
}

#[test]
fn unknown_config_keys_are_rejected() {
    let temp = Project::empty();
    temp.file("bad.toml", "colour = \"blue\"\n");
    temp.pyhost()
        .env("PYHOST_CONFIG", "bad.toml")
        .args(&["list"])
        .fails()
        .stderr_has("colour");
}

#[test]
fn root_flag_overrides_config() {
    let temp = Project::empty();
    temp.file("job.sh", "echo hi\n");

    temp.pyhost()
        .args(&["--root", "elsewhere", "upload", "job.sh"])
        .passes();

    assert!(temp.path().join("elsewhere/42/job/job.sh").is_file());
    assert!(!temp.hosted().exists());
}
