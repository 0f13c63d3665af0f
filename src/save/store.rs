// src/save/store.rs
// =============================================================================
// Writes extracted text to disk.
//
// Every write is atomic: the text goes into a temporary file in the target
// directory, which is then renamed over the destination. A crash or a full
// disk leaves either the old file or the new one, never half of one.
// =============================================================================

use async_trait::async_trait;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

use super::SavePath;

/// Filesystem failures while saving a page
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not create directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("could not move temporary file into {path}: {source}")]
    Persist { path: PathBuf, source: io::Error },

    #[error("save task for {path} did not finish: {message}")]
    Task { path: PathBuf, message: String },
}

/// Somewhere pages can be saved
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Stores `text` at `path`, replacing any existing file.
    /// Returns where it ended up.
    async fn save(&self, path: &SavePath, text: &str) -> Result<PathBuf, StoreError>;
}

/// Saves pages as UTF-8 files under a base directory
#[derive(Debug, Clone)]
pub struct FsStore {
    base: PathBuf,
}

impl FsStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

#[async_trait]
impl PageStore for FsStore {
    async fn save(&self, path: &SavePath, text: &str) -> Result<PathBuf, StoreError> {
        let dir = path.dir_under(&self.base);
        let target = path.under(&self.base);
        let contents = text.to_string();

        // std::fs + tempfile are blocking; keep them off the runtime threads
        let task_target = target.clone();
        tokio::task::spawn_blocking(move || write_atomic(&dir, &task_target, contents.as_bytes()))
            .await
            .map_err(|e| StoreError::Task {
                path: target.clone(),
                message: e.to_string(),
            })??;

        Ok(target)
    }
}

fn write_atomic(dir: &Path, target: &Path, contents: &[u8]) -> Result<(), StoreError> {
    std::fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let write_err = |source| StoreError::Write {
        path: target.to_path_buf(),
        source,
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(write_err)?;
    temp.write_all(contents).map_err(write_err)?;
    temp.as_file().sync_all().map_err(write_err)?;

    temp.persist(target).map_err(|e| StoreError::Persist {
        path: target.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}
