//! Statistics generation from the archive database
//!
//! This module provides functionality for extracting and displaying
//! archive statistics from the storage layer.

use crate::state::ScreenShotStatus;
use crate::storage::DatabaseManager;
use crate::ScrapmonError;
use std::collections::HashMap;

/// Archive statistics summary
#[derive(Debug, Clone)]
pub struct ArchiveStatistics {
    /// Total number of recorded codes
    pub total: u64,

    /// Count of records by status
    pub by_status: HashMap<ScreenShotStatus, u64>,

    /// Most recently recorded code, where the next pass resumes from
    pub latest_code: Option<String>,
}

impl ArchiveStatistics {
    /// Count for one status, zero when absent
    pub fn count(&self, status: ScreenShotStatus) -> u64 {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

/// Loads statistics from storage
///
/// # Arguments
///
/// * `storage` - The database to query
///
/// # Returns
///
/// * `Ok(ArchiveStatistics)` - Successfully loaded statistics
/// * `Err(ScrapmonError)` - Failed to query statistics
pub fn load_statistics(storage: &dyn DatabaseManager) -> Result<ArchiveStatistics, ScrapmonError> {
    let total = storage.count_total()?;

    let mut by_status = HashMap::new();
    for status in ScreenShotStatus::all_states() {
        let count = storage.count_by_status(status)?;
        if count > 0 {
            by_status.insert(status, count);
        }
    }

    let latest_code = storage.latest_created_code()?;

    Ok(ArchiveStatistics {
        total,
        by_status,
        latest_code,
    })
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &ArchiveStatistics) {
    println!("=== Archive Statistics ===\n");

    println!("Overview:");
    println!("  Total codes recorded: {}", stats.total);
    match &stats.latest_code {
        Some(code) => println!("  Latest code: {}", code),
        None => println!("  Latest code: (none)"),
    }
    println!();

    println!("Records by Status:");
    for status in ScreenShotStatus::all_states() {
        let count = stats.count(status);
        let percentage = if stats.total > 0 {
            (count as f64 / stats.total as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", status, count, percentage);
    }
    println!();

    let saved = stats.count(ScreenShotStatus::Success);
    let success_rate = if stats.total > 0 {
        (saved as f64 / stats.total as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Success Rate: {:.1}% ({} / {} codes saved)",
        success_rate, saved, stats.total
    );
}
