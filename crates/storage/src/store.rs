// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact store rooted at the configured directory

use pyhost_core::artifact::SESSION_DIR_PREFIX;
use pyhost_core::{ArtifactLayout, NameError, ResolvedScript};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur in artifact store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid name: {0}")]
    Name(#[from] NameError),
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
}

/// Filesystem-backed store for script artifacts
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    layout: ArtifactLayout,
}

impl ArtifactStore {
    pub fn new(layout: ArtifactLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ArtifactLayout {
        &self.layout
    }

    /// Where a script named `script_name` lives for `identity`.
    ///
    /// Pure path computation; nothing is created.
    pub fn resolve(&self, identity: &str, script_name: &str) -> Result<ResolvedScript, StoreError> {
        Ok(self.layout.resolve(identity, script_name)?)
    }

    /// Write `bytes` to `dir/relative_name`, creating `dir` as needed
    pub fn save(&self, dir: &Path, relative_name: &str, bytes: &[u8]) -> Result<PathBuf, StoreError> {
        let file_name = Path::new(relative_name)
            .file_name()
            .filter(|name| name.len() == relative_name.len())
            .ok_or_else(|| NameError::Invalid(relative_name.to_string()))?;
        let path = dir.join(file_name);
        self.write(&path, bytes)?;
        Ok(path)
    }

    /// Write `bytes` to an already-resolved path, creating its parent
    pub fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, bytes).map_err(write_err)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "artifact saved");
        Ok(())
    }

    /// Create `dir` and any missing parents; an existing directory is fine
    pub fn create_dir(&self, dir: &Path) -> Result<(), StoreError> {
        fs::create_dir_all(dir).map_err(|source| StoreError::Write {
            path: dir.to_path_buf(),
            source,
        })
    }

    pub fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    /// Recursively delete `dir`. Never fails; problems are logged.
    pub fn remove_tree(&self, dir: &Path) {
        match fs::remove_dir_all(dir) {
            Ok(()) => tracing::debug!(dir = %dir.display(), "removed"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(dir = %dir.display(), error = %e, "failed to remove"),
        }
    }

    /// Names of the scripts hosted for `identity`, sorted.
    ///
    /// Ephemeral session directories are not listed.
    pub fn list(&self, identity: &str) -> Result<Vec<String>, StoreError> {
        let dir = self.layout.identity_dir(identity)?;
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Read { path: dir, source }),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Read {
                path: dir.clone(),
                source,
            })?;
            if !entry.file_type().is_ok_and(|t| t.is_dir()) {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if name.starts_with(SESSION_DIR_PREFIX) {
                continue;
            }
            names.push(name);
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
