//! Logger metrics for observability
//!
//! Counters for records written, records stopped by the severity gate, and
//! records that at least one destination failed to accept.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use tslog::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_written();
/// metrics.record_filtered();
///
/// assert_eq!(metrics.records_written(), 1);
/// assert_eq!(metrics.records_filtered(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records delivered to every destination
    records_written: AtomicU64,

    /// Records dropped by the severity gate before rendering
    records_filtered: AtomicU64,

    /// Records that failed to encode or that a destination rejected
    write_errors: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            records_written: AtomicU64::new(0),
            records_filtered: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn records_written(&self) -> u64 {
        self.records_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn records_filtered(&self) -> u64 {
        self.records_filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_errors(&self) -> u64 {
        self.write_errors.load(Ordering::Relaxed)
    }

    /// Record a delivered record, returning the previous count
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.records_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.records_filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_error(&self) -> u64 {
        self.write_errors.fetch_add(1, Ordering::Relaxed)
    }

    /// Get the write error rate as a percentage (0.0 - 100.0)
    ///
    /// Filtered records are not counted. Returns 0.0 if nothing was emitted.
    pub fn error_rate(&self) -> f64 {
        let errors = self.write_errors() as f64;
        let total = self.records_written() as f64 + errors;
        if total == 0.0 {
            0.0
        } else {
            (errors / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.records_written.store(0, Ordering::Relaxed);
        self.records_filtered.store(0, Ordering::Relaxed);
        self.write_errors.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            records_written: AtomicU64::new(self.records_written()),
            records_filtered: AtomicU64::new(self.records_filtered()),
            write_errors: AtomicU64::new(self.write_errors()),
        }
    }
}
