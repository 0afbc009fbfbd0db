//! Storage traits and error types
//!
//! This module defines the trait interfaces for the database and file
//! backends and associated error types.

use crate::state::ScreenShotStatus;
use crate::storage::ScreenShot;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("No record for code: {0}")]
    CodeNotFound(String),

    #[error("Invalid status transition for {code}: {from} -> {to}")]
    InvalidTransition {
        code: String,
        from: ScreenShotStatus,
        to: ScreenShotStatus,
    },

    #[error("Unknown status value in database: {0}")]
    UnknownStatus(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Clearing every persisted item of a backend
pub trait Purger {
    fn purge(&mut self) -> StorageResult<()>;
}

/// Trait for the database backend holding screenshot records
///
/// The scraper is the only writer; implementations are not required to make
/// `code_exists` followed by `create_screenshot` atomic.
pub trait DatabaseManager: Purger {
    /// Inserts a record and returns the identifier assigned to it
    fn create_screenshot(&mut self, screenshot: &ScreenShot) -> StorageResult<i64>;

    /// Moves the record for `code` to `status`
    ///
    /// Fails with [`StorageError::InvalidTransition`] if the stored status
    /// cannot move to `status`.
    fn update_status_by_code(&mut self, code: &str, status: ScreenShotStatus) -> StorageResult<()>;

    /// Updates the file location and status of the record with the same code
    fn update_screenshot_by_code(&mut self, screenshot: &ScreenShot) -> StorageResult<()>;

    /// Code of the most recently created record
    fn latest_created_code(&self) -> StorageResult<Option<String>>;

    /// Whether any record exists for `code`, whatever its status
    fn code_exists(&self, code: &str) -> StorageResult<bool>;

    /// Gets the record for `code`
    fn get_by_code(&self, code: &str) -> StorageResult<Option<ScreenShot>>;

    // ===== Statistics =====

    /// Counts records in a specific status
    fn count_by_status(&self, status: ScreenShotStatus) -> StorageResult<u64>;

    /// Gets total record count
    fn count_total(&self) -> StorageResult<u64>;
}

/// Trait for the file backend holding downloaded payloads
pub trait FileManager: Purger {
    /// Directory under which files are saved
    fn root(&self) -> &Path;

    /// Writes `data` to `path`, creating parent directories
    ///
    /// Returns the path written.
    fn save_file(&mut self, data: &[u8], path: &Path) -> StorageResult<PathBuf>;
}
