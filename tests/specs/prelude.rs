//! Shared helpers for pyhost specs.
//!
//! Every spec gets a fresh temp directory with a config that runs "scripts"
//! under `sh`, so no Python toolchain is needed.

#![allow(dead_code)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The operator every spec config admits
pub const OPERATOR: &str = "42";

/// A scratch project: config file plus the hosted-scripts root
pub struct Project {
    dir: TempDir,
}

impl Project {
    /// Project with the default spec config (persistent mode, 2s deadline)
    pub fn empty() -> Self {
        Self::with_execution("timeout = \"2s\"\n")
    }

    /// Project whose `[execution]` table gets `extra` appended
    pub fn with_execution(extra: &str) -> Self {
        let project = Self {
            dir: TempDir::new().unwrap(),
        };
        let config = format!(
            r#"root = "{root}"
operator = "{operator}"

[execution]
interpreter = ["sh", "{{script}}"]
installer = ["sh", "{{requirements}}"]
script_extension = "sh"
{extra}"#,
            root = project.hosted().display(),
            operator = OPERATOR,
            extra = extra,
        );
        project.file("pyhost.toml", &config);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Root directory artifacts are stored under
    pub fn hosted(&self) -> PathBuf {
        self.path().join("hosted")
    }

    /// Write a file relative to the project, creating parents
    pub fn file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// The pyhost binary, configured for this project
    pub fn pyhost(&self) -> CliBuilder {
        let mut cmd = Command::cargo_bin("pyhost").unwrap();
        cmd.current_dir(self.path())
            .env_remove("PYHOST_ROOT")
            .env_remove("PYHOST_MODE")
            .env_remove("PYHOST_OPERATOR")
            .env_remove("PYHOST_IDENTITY")
            .env_remove("RUST_LOG")
            .env("PYHOST_CONFIG", self.path().join("pyhost.toml"));
        CliBuilder { cmd }
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and expect exit status 0
    pub fn passes(mut self) -> RunAssert {
        RunAssert {
            assert: self.cmd.assert().success(),
        }
    }

    /// Run and expect a non-zero exit status
    pub fn fails(mut self) -> RunAssert {
        RunAssert {
            assert: self.cmd.assert().failure(),
        }
    }
}

pub struct RunAssert {
    assert: assert_cmd::assert::Assert,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.assert.get_output().stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.assert.get_output().stderr).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stdout(predicate::str::contains(expected)),
        }
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        Self {
            assert: self
                .assert
                .stdout(predicate::str::contains(unexpected).not()),
        }
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stderr(predicate::str::contains(expected)),
        }
    }
}
