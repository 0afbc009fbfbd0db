//! Storage module for persisting archive state
//!
//! This module handles both persistence backends used by the scraper:
//! - SQLite database holding one record per attempted code
//! - Local file store holding the downloaded screenshots
//! - Purging both backends as a single operator action

mod files;
mod schema;
mod sqlite;
mod traits;

pub use files::LocalFileStore;
pub use sqlite::SqliteStorage;
pub use traits::{DatabaseManager, FileManager, Purger, StorageError, StorageResult};

use crate::state::ScreenShotStatus;
use crate::ScrapmonError;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Initializes or opens a storage database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Successfully initialized storage
/// * `Err(ScrapmonError)` - Failed to initialize storage
pub fn open_storage(path: &Path) -> Result<SqliteStorage, ScrapmonError> {
    SqliteStorage::new(path)
}

/// Represents one attempted code in the database
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenShot {
    /// Identifier assigned by the store, zero until created
    pub id: i64,
    pub ref_code: String,
    pub code_created_at: DateTime<Utc>,
    /// Location of the saved file, empty until the download succeeded
    pub file_uri: String,
    pub status: ScreenShotStatus,
}

impl ScreenShot {
    /// A fresh pending record for `code`
    pub fn pending(code: impl Into<String>) -> Self {
        Self {
            id: 0,
            ref_code: code.into(),
            code_created_at: Utc::now(),
            file_uri: String::new(),
            status: ScreenShotStatus::Pending,
        }
    }
}

/// Both persistence backends, owned together
pub struct Storage<D, F> {
    pub db: D,
    pub files: F,
}

impl<D: DatabaseManager, F: FileManager> Storage<D, F> {
    pub fn new(db: D, files: F) -> Self {
        Self { db, files }
    }

    /// Clears all records, then all saved files
    ///
    /// The first failing stage aborts the purge. Nothing is rolled back, so a
    /// failure in the file stage leaves an empty database next to old files.
    pub fn purge(&mut self) -> Result<(), ScrapmonError> {
        self.db.purge().map_err(|source| ScrapmonError::Purge {
            stage: "database",
            source,
        })?;
        tracing::info!("Purged screenshot records");

        self.files.purge().map_err(|source| ScrapmonError::Purge {
            stage: "files",
            source,
        })?;
        tracing::info!("Purged saved files under {}", self.files.root().display());

        Ok(())
    }
}
