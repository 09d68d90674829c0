// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pyhost execution engine and session controller

mod error;
mod executor;
mod runtime;

pub use error::RuntimeError;
pub use executor::{Executor, ExecutorConfig};
pub use runtime::{Runtime, RuntimeConfig, RuntimeDeps};
