//! Upload flow specs
//!
//! Verify upload, dependency install, env injection and result reporting.

use crate::prelude::*;

#[test]
fn hello_script_runs_and_reports_output() {
    let temp = Project::empty();
    temp.file("hello.sh", "echo 'hello world'\n");

    temp.pyhost()
        .args(&["upload", "hello.sh"])
        .passes()
        .stdout_has("Saved hello.sh.")
        .stdout_has("Setup complete. Running script...")
        .stdout_has("Output for hello.sh:\nhello world")
        .stdout_lacks("Errors:");

    assert!(temp.hosted().join("42/hello/hello.sh").is_file());
}

#[test]
fn stderr_is_reported_separately() {
    let temp = Project::empty();
    temp.file("noisy.sh", "echo out\necho err >&2\nexit 3\n");

    // The script's own exit code does not fail the run
    temp.pyhost()
        .args(&["upload", "noisy.sh"])
        .passes()
        .stdout_has("Output for noisy.sh:\nout\nErrors:\nerr");
}

#[test]
fn silent_script_says_no_output() {
    let temp = Project::empty();
    temp.file("quiet.sh", "true\n");

    temp.pyhost()
        .args(&["upload", "quiet.sh"])
        .passes()
        .stdout_has("(No Output)");
}

#[test]
fn wrong_script_type_is_rejected_without_saving() {
    let temp = Project::empty();
    temp.file("notes.txt", "not a script");

    temp.pyhost()
        .args(&["upload", "notes.txt"])
        .fails()
        .stdout_has("Please upload a file ending in .sh")
        .stdout_has("Cancelled.");

    assert!(!temp.hosted().join("42").exists());
}

#[test]
fn env_file_values_reach_the_script() {
    let temp = Project::empty();
    temp.file("greet.sh", "echo \"$GREETING, $NAME\"\n");
    temp.file("prod.env", "GREETING=hi\nNAME=\"Ada Lovelace\"\nEMPTY=\n");

    temp.pyhost()
        .args(&["upload", "greet.sh", "--env", "prod.env"])
        .passes()
        .stdout_has("hi, Ada Lovelace");

    assert!(temp.hosted().join("42/greet/.env").is_file());
}

#[test]
fn failed_install_skips_the_script() {
    let temp = Project::empty();
    temp.file("job.sh", "echo should-not-run\n");
    // The spec installer runs the manifest under sh
    temp.file("deps.txt", "echo 'No matching distribution' >&2\nexit 1\n");

    temp.pyhost()
        .args(&["upload", "job.sh", "-r", "deps.txt"])
        .fails()
        .stdout_has("Failed to install requirements: No matching distribution")
        .stdout_lacks("should-not-run");

    assert!(!temp.hosted().join("42/job/libs").exists());
    assert!(temp.hosted().join("42/job/requirements.txt").is_file());
}

#[test]
fn successful_install_puts_cache_on_search_path() {
    let temp = Project::empty();
    temp.file("job.sh", "echo \"path=$PYTHONPATH\"\n");
    temp.file("requirements.txt", "echo installing\n");

    let run = temp
        .pyhost()
        .args(&["upload", "job.sh", "--requirements", "requirements.txt"])
        .passes()
        .stdout_has("First time setup: installing requirements...");

    let libs = temp.hosted().join("42/job/libs");
    assert!(libs.is_dir());
    assert!(run.stdout().contains(&format!("path={}", libs.display())));
}

#[test]
fn long_running_script_times_out() {
    let temp = Project::with_execution("timeout = \"1s\"\n");
    temp.file("slow.sh", "echo started\nsleep 30\n");

    let start = std::time::Instant::now();
    temp.pyhost()
        .args(&["upload", "slow.sh"])
        .fails()
        .stdout_has("Timeout: slow.sh ran longer than 1s.")
        .stdout_lacks("started");
    assert!(start.elapsed() < std::time::Duration::from_secs(20));
}

#[test]
fn long_output_is_truncated() {
    let temp = Project::with_execution("timeout = \"5s\"\nstdout_limit = 10\n");
    temp.file("loud.sh", "echo 0123456789abcdef\n");

    temp.pyhost()
        .args(&["upload", "loud.sh"])
        .passes()
        .stdout_has("0123456789... (truncated)")
        .stdout_lacks("abcdef");
}

#[test]
fn json_output_carries_the_result() {
    let temp = Project::empty();
    temp.file("hello.sh", "echo hi\n");

    temp.pyhost()
        .args(&["upload", "hello.sh", "-o", "json"])
        .passes()
        .stdout_has("\"kind\": \"completed\"")
        .stdout_has("\"stdout\": \"hi\\n\"")
        .stderr_has("Setup complete.");
}
