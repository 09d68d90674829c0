// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use pyhost_core::ProcessEnv;
use std::time::Duration;

fn spec(program: &str) -> ProcessSpec {
    ProcessSpec {
        program: program.to_string(),
        args: vec!["job.py".to_string()],
        cwd: "/srv/hosted/42/job".into(),
        env: ProcessEnv::new(),
        timeout: Duration::from_secs(60),
    }
}

#[tokio::test]
async fn fake_records_calls_and_defaults_to_success() {
    let runner = FakeProcessRunner::new();

    let output = runner.run(&spec("python3")).await.unwrap();

    assert!(output.success());
    assert!(output.stdout.is_empty());
    assert_eq!(runner.programs(), vec!["python3"]);
    assert_eq!(runner.calls()[0].spec.args, vec!["job.py"]);
}

#[tokio::test]
async fn fake_replays_scripted_responses() {
    let runner = FakeProcessRunner::new();
    runner.respond("pip", FakeResponse::fail(1, "no such package"));
    runner.respond("python3", FakeResponse::TimeOut);

    let pip = runner.run(&spec("pip")).await.unwrap();
    assert_eq!(pip.exit_code, Some(1));
    assert_eq!(pip.stderr_text(), "no such package");

    let python = runner.run(&spec("python3")).await;
    assert_eq!(python, Err(ProcessError::TimedOut(Duration::from_secs(60))));
}
