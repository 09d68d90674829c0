// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod list;
pub mod run;
pub mod upload;

use anyhow::Result;
use pyhost_engine::RuntimeError;
use std::process::ExitCode;

/// Exit status for a runtime error.
///
/// Refusals were already reported to the operator as messages, so they exit
/// quietly; anything else propagates.
pub fn refused(err: RuntimeError) -> Result<ExitCode> {
    match err {
        RuntimeError::NotFound(_) | RuntimeError::Unauthorized(_) | RuntimeError::NoSession(_) => {
            tracing::debug!(error = %err, "refused");
            Ok(ExitCode::FAILURE)
        }
        RuntimeError::Store(e) => Err(e.into()),
    }
}
