//! Engine counters
//!
//! - Counters only
//! - Monotonic increase
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters of one engine.
///
/// Uses Relaxed ordering; counters are independent of each other.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    queries_run: AtomicU64,
    conversions: AtomicU64,
    conversion_failures: AtomicU64,
    goals_written: AtomicU64,
    goals_read: AtomicU64,
    bytes_written: AtomicU64,
}

impl EngineMetrics {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_queries_run(&self) {
        self.queries_run.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_conversions(&self) {
        self.conversions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_conversion_failures(&self) {
        self.conversion_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_goals_read(&self, count: u64) {
        self.goals_read.fetch_add(count, Ordering::Relaxed);
    }

    /// Record one written goal tree of `bytes` encoded bytes
    pub fn record_write(&self, bytes: u64) {
        self.goals_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Get all counters at once
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_run: self.queries_run.load(Ordering::Relaxed),
            conversions: self.conversions.load(Ordering::Relaxed),
            conversion_failures: self.conversion_failures.load(Ordering::Relaxed),
            goals_written: self.goals_written.load(Ordering::Relaxed),
            goals_read: self.goals_read.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of every counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MetricsSnapshot {
    pub queries_run: u64,
    pub conversions: u64,
    pub conversion_failures: u64,
    pub goals_written: u64,
    pub goals_read: u64,
    pub bytes_written: u64,
}
