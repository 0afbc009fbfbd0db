//! Output module for reporting on the archive
//!
//! This module handles:
//! - Collecting per-status record counts
//! - Printing them for the `stats` command

pub mod stats;

pub use stats::{load_statistics, print_statistics, ArchiveStatistics};
