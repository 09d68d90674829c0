// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: child processes, operator notifications and access

pub mod access;
pub mod notify;
pub mod process;
pub mod traced;

pub use access::{AccessPolicy, AllowAll, SingleOperator};
pub use notify::{NoOpNotifyAdapter, NotifyAdapter, NotifyError};
pub use process::{LocalProcessRunner, ProcessError, ProcessOutput, ProcessRunner, ProcessSpec};
pub use traced::{TracedNotifyAdapter, TracedProcessRunner};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifyAdapter, NotifyCall};
#[cfg(any(test, feature = "test-support"))]
pub use process::{FakeProcessRunner, FakeResponse, ProcessCall};
