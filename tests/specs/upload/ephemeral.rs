//! Ephemeral mode specs
//!
//! Verify nothing outlives a run when artifacts are ephemeral.

use crate::prelude::*;

fn leftovers(temp: &Project) -> Vec<String> {
    match std::fs::read_dir(temp.hosted().join(OPERATOR)) {
        Ok(entries) => entries
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    }
}

#[test]
fn session_dir_is_removed_after_success() {
    let temp = Project::empty();
    temp.file("hello.sh", "echo hi\n");

    temp.pyhost()
        .args(&["--mode", "ephemeral", "upload", "hello.sh"])
        .passes()
        .stdout_has("Output for hello.sh:\nhi");

    assert!(leftovers(&temp).is_empty(), "left behind: {:?}", leftovers(&temp));
}

#[test]
fn session_dir_is_removed_after_failed_install() {
    let temp = Project::empty();
    temp.file("job.sh", "echo hi\n");
    temp.file("requirements.txt", "exit 1\n");

    temp.pyhost()
        .args(&["--mode", "ephemeral", "upload", "job.sh", "-r", "requirements.txt"])
        .fails()
        .stdout_has("Failed to install requirements");

    assert!(leftovers(&temp).is_empty(), "left behind: {:?}", leftovers(&temp));
}

#[test]
fn session_dir_is_removed_after_timeout() {
    let temp = Project::with_execution("timeout = \"1s\"\n");
    temp.file("slow.sh", "sleep 30\n");

    temp.pyhost()
        .env("PYHOST_MODE", "ephemeral")
        .args(&["upload", "slow.sh"])
        .fails()
        .stdout_has("Timeout");

    assert!(leftovers(&temp).is_empty(), "left behind: {:?}", leftovers(&temp));
}

#[test]
fn ephemeral_scripts_are_not_rerunnable() {
    let temp = Project::empty();
    temp.file("hello.sh", "echo hi\n");
    temp.pyhost()
        .args(&["--mode", "ephemeral", "upload", "hello.sh"])
        .passes();

    temp.pyhost()
        .args(&["--mode", "ephemeral", "run", "hello"])
        .fails()
        .stdout_has("not found");
}
