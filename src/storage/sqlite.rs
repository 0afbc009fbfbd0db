//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the DatabaseManager trait.

use crate::state::ScreenShotStatus;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{DatabaseManager, Purger, StorageError, StorageResult};
use crate::storage::ScreenShot;
use crate::ScrapmonError;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(ScrapmonError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, ScrapmonError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn open_in_memory() -> Result<Self, ScrapmonError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn status_of(&self, code: &str) -> StorageResult<ScreenShotStatus> {
        let status: Option<String> = self
            .conn
            .query_row(
                "SELECT status FROM screenshots WHERE ref_code = ?1",
                params![code],
                |row| row.get(0),
            )
            .optional()?;

        let status = status.ok_or_else(|| StorageError::CodeNotFound(code.to_string()))?;
        ScreenShotStatus::from_db_string(&status).ok_or(StorageError::UnknownStatus(status))
    }

    fn check_transition(&self, code: &str, to: ScreenShotStatus) -> StorageResult<()> {
        let from = self.status_of(code)?;
        if !from.can_transition_to(to) {
            return Err(StorageError::InvalidTransition {
                code: code.to_string(),
                from,
                to,
            });
        }
        Ok(())
    }
}

fn screenshot_from_row(row: &Row<'_>) -> rusqlite::Result<ScreenShot> {
    let created_at: String = row.get(2)?;
    let code_created_at = created_at
        .parse::<DateTime<Utc>>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

    let status: String = row.get(4)?;
    let status = ScreenShotStatus::from_db_string(&status).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            Type::Text,
            Box::new(StorageError::UnknownStatus(status.clone())),
        )
    })?;

    Ok(ScreenShot {
        id: row.get(0)?,
        ref_code: row.get(1)?,
        code_created_at,
        file_uri: row.get(3)?,
        status,
    })
}

impl Purger for SqliteStorage {
    fn purge(&mut self) -> StorageResult<()> {
        self.conn.execute("DELETE FROM screenshots", [])?;
        Ok(())
    }
}

impl DatabaseManager for SqliteStorage {
    fn create_screenshot(&mut self, screenshot: &ScreenShot) -> StorageResult<i64> {
        self.conn.execute(
            "INSERT INTO screenshots (ref_code, code_created_at, file_uri, status)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                screenshot.ref_code,
                screenshot.code_created_at.to_rfc3339(),
                screenshot.file_uri,
                screenshot.status.to_db_string()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_status_by_code(
        &mut self,
        code: &str,
        status: ScreenShotStatus,
    ) -> StorageResult<()> {
        self.check_transition(code, status)?;
        self.conn.execute(
            "UPDATE screenshots SET status = ?1 WHERE ref_code = ?2",
            params![status.to_db_string(), code],
        )?;
        Ok(())
    }

    fn update_screenshot_by_code(&mut self, screenshot: &ScreenShot) -> StorageResult<()> {
        self.check_transition(&screenshot.ref_code, screenshot.status)?;
        self.conn.execute(
            "UPDATE screenshots SET file_uri = ?1, status = ?2 WHERE ref_code = ?3",
            params![
                screenshot.file_uri,
                screenshot.status.to_db_string(),
                screenshot.ref_code
            ],
        )?;
        Ok(())
    }

    fn latest_created_code(&self) -> StorageResult<Option<String>> {
        let code = self
            .conn
            .query_row(
                "SELECT ref_code FROM screenshots ORDER BY id DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(code)
    }

    fn code_exists(&self, code: &str) -> StorageResult<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM screenshots WHERE ref_code = ?1)",
            params![code],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn get_by_code(&self, code: &str) -> StorageResult<Option<ScreenShot>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, ref_code, code_created_at, file_uri, status
             FROM screenshots WHERE ref_code = ?1",
        )?;

        let screenshot = stmt
            .query_row(params![code], screenshot_from_row)
            .optional()?;

        Ok(screenshot)
    }

    // ===== Statistics =====

    fn count_by_status(&self, status: ScreenShotStatus) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM screenshots WHERE status = ?1",
            params![status.to_db_string()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn count_total(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM screenshots", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
