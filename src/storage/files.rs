//! Local filesystem store for downloaded screenshots

use crate::storage::traits::{FileManager, Purger, StorageResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Saves payloads as plain files under a root directory
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Purger for LocalFileStore {
    /// Removes everything under the root, keeping the root itself
    fn purge(&mut self) -> StorageResult<()> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        for entry in entries {
            let path = entry?.path();
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
        }

        Ok(())
    }
}

impl FileManager for LocalFileStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn save_file(&mut self, data: &[u8], path: &Path) -> StorageResult<PathBuf> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, data)?;
        Ok(path.to_path_buf())
    }
}
