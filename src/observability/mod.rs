//! Observability subsystem
//!
//! - Structured logging (JSON)
//! - Typed lifecycle events
//! - Engine counters
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on query results
//! 3. No background threads
//! 4. Deterministic output apart from the timestamp
//!
//! # Usage
//!
//! ```ignore
//! use kanrendb::observability::{log_event, Event, EngineMetrics};
//!
//! log_event(Event::GoalWritten, &[("key", "pokemon")]);
//!
//! let metrics = EngineMetrics::new();
//! metrics.increment_queries_run();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{EngineMetrics, MetricsSnapshot};

/// Log an event at INFO, or at FATAL if the event is fatal
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        log_event(Event::QueryStart, &[]);
        log_event(Event::GoalWritten, &[("key", "pokemon")]);
    }
}
