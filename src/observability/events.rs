//! Observable engine events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Engine configuration loaded from a file
    ConfigLoaded,

    // Query lifecycle
    /// A goal tree is about to be converted and run
    QueryStart,
    /// The goal tree was converted into an executable goal
    QueryConverted,
    /// Conversion failed for a reason other than an unknown constraint
    QueryRejected,
    /// A stored constraint name is not registered (FATAL)
    UnknownConstraint,

    // Storage
    /// A goal tree was written
    GoalWritten,
    /// A goal tree was read
    GoalRead,
    /// A read found no goal tree under the key
    GoalMissing,
    /// A range of goal trees was read
    RangeRead,
    /// A stored record failed validation (FATAL)
    StorageCorruption,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::QueryStart => "QUERY_BEGIN",
            Event::QueryConverted => "QUERY_CONVERTED",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::UnknownConstraint => "UNKNOWN_CONSTRAINT",
            Event::GoalWritten => "GOAL_WRITTEN",
            Event::GoalRead => "GOAL_READ",
            Event::GoalMissing => "GOAL_MISSING",
            Event::RangeRead => "GOAL_RANGE_READ",
            Event::StorageCorruption => "STORAGE_CORRUPTION",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::UnknownConstraint | Event::StorageCorruption)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
