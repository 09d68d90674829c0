// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact layout
//!
//! Pure path derivation for hosted scripts. A script `hello.py` uploaded by
//! identity `42` lives at:
//!
//! ```text
//! <root>/42/hello/hello.py
//! <root>/42/hello/requirements.txt
//! <root>/42/hello/.env
//! <root>/42/hello/libs/
//! ```
//!
//! Ephemeral sessions use `<root>/<identity>/session-<token>/` instead, so
//! that concurrent sessions never share a directory.

use crate::config::ExecMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name the dependency manifest is stored under
pub const REQUIREMENTS_FILE: &str = "requirements.txt";

/// File name the environment file is stored under
pub const ENV_FILE: &str = ".env";

/// Directory name of the dependency cache
pub const DEPS_DIR: &str = "libs";

/// Prefix of per-session directories in ephemeral mode
pub const SESSION_DIR_PREFIX: &str = "session-";

/// Errors deriving artifact names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("script name is empty")]
    Empty,
    #[error("invalid script name: {0}")]
    Invalid(String),
    #[error("invalid identity: {0:?}")]
    Identity(String),
}

/// The role an uploaded file plays in an artifact set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactRole {
    Script,
    Requirements,
    Env,
}

impl ArtifactRole {
    pub fn name(&self) -> &'static str {
        match self {
            ArtifactRole::Script => "script",
            ArtifactRole::Requirements => "requirements",
            ArtifactRole::Env => "env",
        }
    }
}

/// Where one script's artifacts live, before anything is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedScript {
    pub dir: PathBuf,
    pub file_name: String,
}

/// Derives artifact directories from identities and script names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    root: PathBuf,
    mode: ExecMode,
    script_extension: String,
}

impl ArtifactLayout {
    pub fn new(root: impl Into<PathBuf>, mode: ExecMode, script_extension: &str) -> Self {
        Self {
            root: root.into(),
            mode,
            script_extension: script_extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn mode(&self) -> ExecMode {
        self.mode
    }

    pub fn script_extension(&self) -> &str {
        &self.script_extension
    }

    /// Directory holding everything hosted for `identity`
    pub fn identity_dir(&self, identity: &str) -> Result<PathBuf, NameError> {
        Ok(self.root.join(checked_identity(identity)?))
    }

    /// Whether `file_name` carries the configured script extension
    pub fn is_script_name(&self, file_name: &str) -> bool {
        has_extension(file_name, &self.script_extension)
    }

    /// Resolve the persistent location of a script.
    ///
    /// A bare name (`hello`) resolves to the same set as `hello.py`, so a
    /// re-run can name the script either way.
    pub fn resolve(&self, identity: &str, script_name: &str) -> Result<ResolvedScript, NameError> {
        let mut file_name = normalize_name(script_name)?;
        if !self.is_script_name(&file_name) {
            file_name = format!("{}.{}", file_name, self.script_extension);
        }
        let base = dir_component(&file_name, &self.script_extension);
        Ok(ResolvedScript {
            dir: self.identity_dir(identity)?.join(base),
            file_name,
        })
    }

    /// Resolve where an uploaded script goes for this session
    ///
    /// Persistent mode ignores the token; ephemeral mode ignores the name for
    /// the directory and keys it by the token.
    pub fn resolve_upload(
        &self,
        identity: &str,
        token: Option<&str>,
        script_name: &str,
    ) -> Result<ResolvedScript, NameError> {
        match (self.mode, token) {
            (ExecMode::Ephemeral, Some(token)) => {
                let file_name = normalize_name(script_name)?;
                let token = normalize_name(token)?;
                Ok(ResolvedScript {
                    dir: self
                        .identity_dir(identity)?
                        .join(format!("{}{}", SESSION_DIR_PREFIX, token)),
                    file_name,
                })
            }
            _ => self.resolve(identity, script_name),
        }
    }
}

/// Normalize an uploaded file name: keep the last path component and
/// replace spaces with underscores.
pub fn normalize_name(name: &str) -> Result<String, NameError> {
    let last = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if last.is_empty() {
        return Err(NameError::Empty);
    }
    if last == "." || last == ".." || last.contains('\0') {
        return Err(NameError::Invalid(name.to_string()));
    }
    Ok(last.replace(' ', "_"))
}

fn checked_identity(identity: &str) -> Result<&str, NameError> {
    let valid = !identity.is_empty()
        && identity != "."
        && identity != ".."
        && !identity.contains(['/', '\\', '\0']);
    if valid {
        Ok(identity)
    } else {
        Err(NameError::Identity(identity.to_string()))
    }
}

fn has_extension(file_name: &str, extension: &str) -> bool {
    Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Directory component for a script: the file name without its extension
fn dir_component(file_name: &str, extension: &str) -> String {
    let suffix_len = extension.len() + 1;
    if has_extension(file_name, extension) && file_name.len() > suffix_len {
        file_name[..file_name.len() - suffix_len].to_string()
    } else {
        file_name.to_string()
    }
}

/// The files making up one hosted script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSet {
    pub dir: PathBuf,
    pub script_name: String,
    pub script_path: PathBuf,
    pub requirements_path: Option<PathBuf>,
    pub env_path: Option<PathBuf>,
    pub deps_cache_path: PathBuf,
}

impl ArtifactSet {
    /// A set holding only the script body
    pub fn new(resolved: &ResolvedScript) -> Self {
        Self {
            dir: resolved.dir.clone(),
            script_name: resolved.file_name.clone(),
            script_path: resolved.dir.join(&resolved.file_name),
            requirements_path: None,
            env_path: None,
            deps_cache_path: resolved.dir.join(DEPS_DIR),
        }
    }

    /// Rebuild a set from what is already on disk (direct re-run path)
    pub fn discover(resolved: &ResolvedScript) -> Self {
        let mut set = Self::new(resolved);
        let requirements = set.dir.join(REQUIREMENTS_FILE);
        if requirements.is_file() {
            set.requirements_path = Some(requirements);
        }
        let env = set.dir.join(ENV_FILE);
        if env.is_file() {
            set.env_path = Some(env);
        }
        set
    }

    /// File name a file playing `role` is stored under inside `dir`
    pub fn file_name_for(&self, role: ArtifactRole) -> String {
        match role {
            ArtifactRole::Script => self.script_name.clone(),
            ArtifactRole::Requirements => REQUIREMENTS_FILE.to_string(),
            ArtifactRole::Env => ENV_FILE.to_string(),
        }
    }

    /// Path a file playing `role` is stored under
    pub fn path_for(&self, role: ArtifactRole) -> PathBuf {
        self.dir.join(self.file_name_for(role))
    }

    /// Record that a file playing `role` has been stored
    pub fn with_artifact(mut self, role: ArtifactRole) -> Self {
        let path = self.path_for(role);
        match role {
            ArtifactRole::Script => self.script_path = path,
            ArtifactRole::Requirements => self.requirements_path = Some(path),
            ArtifactRole::Env => self.env_path = Some(path),
        }
        self
    }
}

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;
