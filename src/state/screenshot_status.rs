/// Screenshot status definitions for tracking archival progress
///
/// This module defines all possible states a code's archival attempt can be in.
use std::fmt;

/// Represents the current state of a screenshot record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenShotStatus {
    // ===== Active States =====
    /// Record created, fetch not yet attempted
    Pending,

    /// A payload was received and is being written to the file store
    Ongoing,

    // ===== Terminal States =====
    /// Payload fetched and saved
    Success,

    /// Fetch errored or returned no payload
    Failure,

    /// The remote resource does not exist
    NotFound,
}

impl ScreenShotStatus {
    /// Returns true if no further transitions are allowed
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failure | Self::NotFound)
    }

    /// Returns true if this is an active state (record may still change)
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Checks whether moving from `self` to `next` is a legal transition
    ///
    /// ```text
    /// pending -> ongoing -> success
    ///    |          |----> failure
    ///    |          '----> notfound
    ///    |---------------> failure
    ///    '---------------> notfound
    /// ```
    pub fn can_transition_to(&self, next: Self) -> bool {
        match self {
            Self::Pending => matches!(next, Self::Ongoing | Self::Failure | Self::NotFound),
            Self::Ongoing => matches!(next, Self::Success | Self::Failure | Self::NotFound),
            Self::Success | Self::Failure | Self::NotFound => false,
        }
    }

    /// Converts the status to its database string representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ongoing => "ongoing",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::NotFound => "notfound",
        }
    }

    /// Parses a status from its database string representation
    ///
    /// Returns None if the string doesn't match any known status.
    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "ongoing" => Some(Self::Ongoing),
            "success" => Some(Self::Success),
            "failure" => Some(Self::Failure),
            "notfound" => Some(Self::NotFound),
            _ => None,
        }
    }

    /// Returns all possible statuses
    pub fn all_states() -> [Self; 5] {
        [
            Self::Pending,
            Self::Ongoing,
            Self::Success,
            Self::Failure,
            Self::NotFound,
        ]
    }
}

impl fmt::Display for ScreenShotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_string())
    }
}
