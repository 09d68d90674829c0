// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session token generation

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Generates tokens naming ephemeral session directories
pub trait TokenGen: Clone + Send + Sync {
    fn next_token(&self) -> String;
}

/// UUID-based tokens for production use.
///
/// Uses the simple (hyphen-free) form so tokens are safe as path components.
#[derive(Clone, Default)]
pub struct UuidTokens;

impl TokenGen for UuidTokens {
    fn next_token(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

/// Predictable tokens for tests
#[derive(Clone)]
pub struct SequentialTokens {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialTokens {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialTokens {
    fn default() -> Self {
        Self::new("tok")
    }
}

impl TokenGen for SequentialTokens {
    fn next_token(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{}{}", self.prefix, n)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
