// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine runtime

use pyhost_storage::StoreError;
use thiserror::Error;

/// Errors that can occur in the runtime
///
/// Failures of a run itself are not errors; they are reported as an
/// [`pyhost_core::Outcome`].
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("script not found: {0}")]
    NotFound(String),
    #[error("identity not authorized: {0}")]
    Unauthorized(String),
    #[error("no upload in progress for {0}")]
    NoSession(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
