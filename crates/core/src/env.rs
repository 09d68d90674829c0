// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment construction for script runs
//!
//! The child environment is derived, never mutated in place:
//!
//! 1. start from a copy of the ambient environment
//! 2. prepend the dependency cache to the module search path, if it exists
//! 3. apply non-empty `KEY=VALUE` pairs from the `.env` file, if it exists
//!
//! Empty values in the `.env` file are skipped: they neither unset nor
//! overwrite an ambient value. Malformed lines are skipped too.

use std::collections::BTreeMap;
use std::path::Path;

/// Environment handed to a child process
pub type ProcessEnv = BTreeMap<String, String>;

const PATH_LIST_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// Snapshot of the current process environment.
///
/// Variables that are not valid UTF-8 are left out.
pub fn ambient() -> ProcessEnv {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

/// Derive the environment for one run
pub fn build_env(
    ambient: &ProcessEnv,
    search_path_var: &str,
    deps_cache: &Path,
    env_file: Option<&Path>,
) -> ProcessEnv {
    let mut env = ambient.clone();

    if deps_cache.is_dir() {
        let deps = deps_cache.display().to_string();
        let value = match env.get(search_path_var) {
            Some(existing) if !existing.is_empty() => {
                format!("{}{}{}", deps, PATH_LIST_SEPARATOR, existing)
            }
            _ => deps,
        };
        env.insert(search_path_var.to_string(), value);
    }

    if let Some(path) = env_file.filter(|p| p.is_file()) {
        for (key, value) in read_env_file(path) {
            if value.is_empty() {
                continue;
            }
            env.insert(key, value);
        }
    }

    env
}

/// Parse a `.env` file, skipping lines that do not parse.
///
/// Each physical line is parsed on its own, so an unterminated quote or a
/// line that is not UTF-8 only costs that line. Values cannot span lines.
/// Returns pairs in file order; later duplicates win when applied.
pub fn read_env_file(path: &Path) -> Vec<(String, String)> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read env file");
            return Vec::new();
        }
    };

    let mut pairs = Vec::new();
    for (index, raw) in bytes.split(|b| *b == b'\n').enumerate() {
        let line_no = index + 1;
        let Ok(line) = std::str::from_utf8(raw) else {
            tracing::debug!(path = %path.display(), line = line_no, "skipping env line that is not UTF-8");
            continue;
        };
        for item in dotenvy::from_read_iter(line.trim_end_matches('\r').as_bytes()) {
            match item {
                Ok(pair) => pairs.push(pair),
                Err(e) => {
                    tracing::debug!(path = %path.display(), line = line_no, error = %e, "skipping malformed env line");
                }
            }
        }
    }
    pairs
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
