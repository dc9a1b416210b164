//! Logger metrics for observability
//!
//! Counters describing dispatch health: how many events were built, how
//! many handler invocations succeeded, were gated out by level, or failed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_field_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dispatched();
/// metrics.record_emitted();
/// metrics.record_failure();
///
/// assert_eq!(metrics.events_dispatched(), 1);
/// assert_eq!(metrics.events_emitted(), 1);
/// assert_eq!(metrics.handler_failures(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Events built by `log` calls
    events_dispatched: AtomicU64,

    /// Handler invocations that completed successfully
    events_emitted: AtomicU64,

    /// Handler invocations skipped by level gating
    events_skipped: AtomicU64,

    /// Handler invocations that returned an error or panicked
    handler_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            events_dispatched: AtomicU64::new(0),
            events_emitted: AtomicU64::new(0),
            events_skipped: AtomicU64::new(0),
            handler_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn events_dispatched(&self) -> u64 {
        self.events_dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn events_emitted(&self) -> u64 {
        self.events_emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn events_skipped(&self) -> u64 {
        self.events_skipped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn handler_failures(&self) -> u64 {
        self.handler_failures.load(Ordering::Relaxed)
    }

    /// Record an event built by a log call
    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.events_dispatched.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a successful handler invocation
    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.events_emitted.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a handler skipped by level gating
    #[inline]
    pub fn record_skipped(&self) -> u64 {
        self.events_skipped.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a failed or panicked handler invocation
    #[inline]
    pub fn record_failure(&self) -> u64 {
        self.handler_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Get failure rate as a percentage (0.0 - 100.0) of handler invocations
    ///
    /// Returns 0.0 if no handler has been invoked.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.handler_failures() as f64;
        let total = self.events_emitted() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.events_dispatched.store(0, Ordering::Relaxed);
        self.events_emitted.store(0, Ordering::Relaxed);
        self.events_skipped.store(0, Ordering::Relaxed);
        self.handler_failures.store(0, Ordering::Relaxed);
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
            events_dispatched: AtomicU64::new(self.events_dispatched()),
            events_emitted: AtomicU64::new(self.events_emitted()),
            events_skipped: AtomicU64::new(self.events_skipped()),
            handler_failures: AtomicU64::new(self.handler_failures()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.events_dispatched(), 0);
        assert_eq!(metrics.events_emitted(), 0);
        assert_eq!(metrics.events_skipped(), 0);
        assert_eq!(metrics.handler_failures(), 0);
    }

    #[test]
    fn test_metrics_record_failure() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_failure(), 0); // Returns previous value
        assert_eq!(metrics.handler_failures(), 1);
        metrics.record_failure();
        assert_eq!(metrics.handler_failures(), 2);
    }

    #[test]
    fn test_metrics_failure_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        for _ in 0..100 {
            metrics.record_emitted();
        }
        assert_eq!(metrics.failure_rate(), 0.0);

        for _ in 0..10 {
            metrics.record_failure();
        }
        let rate = metrics.failure_rate();
        assert!(rate > 9.0 && rate < 10.0, "Failure rate was {}", rate);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = LoggerMetrics::new();
        metrics.record_dispatched();
        metrics.record_skipped();
        metrics.record_failure();

        metrics.reset();

        assert_eq!(metrics.events_dispatched(), 0);
        assert_eq!(metrics.events_skipped(), 0);
        assert_eq!(metrics.handler_failures(), 0);
    }

    #[test]
    fn test_metrics_clone() {
        let metrics = LoggerMetrics::new();
        metrics.record_emitted();
        metrics.record_emitted();

        let snapshot = metrics.clone();
        assert_eq!(snapshot.events_emitted(), 2);

        // Original and clone are independent
        metrics.record_emitted();
        assert_eq!(metrics.events_emitted(), 3);
        assert_eq!(snapshot.events_emitted(), 2);
    }
}
