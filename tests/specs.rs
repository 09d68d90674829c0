//! Behavioral specifications for the pyhost CLI.
//!
//! These tests are black-box: they invoke the CLI binary and verify
//! stdout, stderr, exit codes and what is left on disk.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
#[path = "specs/cli/config.rs"]
mod cli_config;
#[path = "specs/cli/help.rs"]
mod cli_help;

// upload/
#[path = "specs/upload/flow.rs"]
mod upload_flow;
#[path = "specs/upload/ephemeral.rs"]
mod upload_ephemeral;

// scripts/
#[path = "specs/scripts/access.rs"]
mod scripts_access;
#[path = "specs/scripts/rerun.rs"]
mod scripts_rerun;
