//! State module for tracking screenshot archival progress
//!
//! # Components
//!
//! - `ScreenShotStatus`: lifecycle of a single code's archival attempt
//!   (pending, ongoing, success, failure, notfound) and the legal transitions
//!   between those states

mod screenshot_status;

pub use screenshot_status::ScreenShotStatus;
