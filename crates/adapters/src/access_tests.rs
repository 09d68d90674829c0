// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn single_operator_admits_only_the_operator() {
    let policy = SingleOperator::new(Some("42".to_string()));
    assert!(policy.is_authorized("42"));
    assert!(!policy.is_authorized("43"));
    assert!(!policy.is_authorized(""));
}

#[test]
fn unconfigured_operator_denies_everyone() {
    assert!(!SingleOperator::new(None).is_authorized("42"));
    assert!(!SingleOperator::new(Some("  ".to_string())).is_authorized("  "));
}

#[test]
fn allow_all_admits_anyone() {
    assert!(AllowAll.is_authorized("anyone"));
}
