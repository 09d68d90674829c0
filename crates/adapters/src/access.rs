// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator authorization

/// Decides which identities may use the host
pub trait AccessPolicy: Clone + Send + Sync + 'static {
    fn is_authorized(&self, identity: &str) -> bool;
}

/// Admits exactly one configured operator.
///
/// With no operator configured nobody is admitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SingleOperator {
    operator: Option<String>,
}

impl SingleOperator {
    pub fn new(operator: Option<String>) -> Self {
        Self {
            operator: operator.filter(|o| !o.trim().is_empty()),
        }
    }

    pub fn operator(&self) -> Option<&str> {
        self.operator.as_deref()
    }
}

impl AccessPolicy for SingleOperator {
    fn is_authorized(&self, identity: &str) -> bool {
        self.operator.as_deref() == Some(identity)
    }
}

/// Admits everyone
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn is_authorized(&self, _identity: &str) -> bool {
        true
    }
}

#[cfg(test)]
#[path = "access_tests.rs"]
mod tests;
