//! Re-run and listing specs
//!
//! Verify stored scripts can be run again by name and listed.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn rerun_by_bare_name_uses_stored_artifacts() {
    let temp = Project::empty();
    temp.file("greet.sh", "echo \"hello $NAME\"\n");
    temp.file(".env", "NAME=again\n");
    temp.pyhost()
        .args(&["upload", "greet.sh", "-e", ".env"])
        .passes();

    temp.pyhost()
        .args(&["run", "greet"])
        .passes()
        .stdout_has("Executing greet.sh...")
        .stdout_has("hello again");
}

#[test]
fn rerun_does_not_reinstall_dependencies() {
    let temp = Project::empty();
    temp.file("job.sh", "echo ran\n");
    // Counts installs in a file next to the manifest
    temp.file("requirements.txt", "echo x >> ../installs\n");
    temp.pyhost()
        .args(&["upload", "job.sh", "-r", "requirements.txt"])
        .passes();

    temp.pyhost()
        .args(&["run", "job.sh"])
        .passes()
        .stdout_has("ran")
        .stdout_lacks("installing requirements");

    let installs = std::fs::read_to_string(temp.hosted().join("42/installs")).unwrap();
    assert_eq!(installs, "x\n");
}

#[test]
fn rerun_of_unknown_script_creates_nothing() {
    let temp = Project::empty();

    temp.pyhost()
        .args(&["run", "ghost"])
        .fails()
        .stdout_has("File ghost not found in your storage.");

    assert!(!temp.hosted().exists());
}

#[test]
fn list_shows_hosted_scripts_sorted() {
    let temp = Project::empty();
    temp.pyhost()
        .args(&["list"])
        .passes()
        .stdout_has("No scripts hosted yet.");

    temp.file("zeta.sh", "true\n");
    temp.file("alpha job.sh", "true\n");
    temp.pyhost().args(&["upload", "zeta.sh"]).passes();
    temp.pyhost().args(&["upload", "alpha job.sh"]).passes();

    let listing = temp.pyhost().args(&["list"]).passes().stdout();
    assert_eq!(listing, "Hosted scripts:\n  alpha_job.sh\n  zeta.sh\n");
}

#[test]
fn list_as_json() {
    let temp = Project::empty();
    temp.file("one.sh", "true\n");
    temp.pyhost().args(&["upload", "one.sh"]).passes();

    temp.pyhost()
        .args(&["list", "-o", "json"])
        .passes()
        .stdout_has("\"one\"");
}
