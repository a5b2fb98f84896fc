use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing student activity since startup.
#[derive(Default)]
pub struct StudentMetrics {
    created: AtomicU64,
    updated: AtomicU64,
    deleted: AtomicU64,
    summaries_generated: AtomicU64,
    summary_failures: AtomicU64,
}

impl StudentMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful create.
    pub fn record_created(&self) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful update.
    pub fn record_updated(&self) {
        self.updated.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful delete.
    pub fn record_deleted(&self) {
        self.deleted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of a summary request.
    pub fn record_summary(&self, succeeded: bool) {
        let counter = if succeeded {
            &self.summaries_generated
        } else {
            &self.summary_failures
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    ///
    /// `students_stored` is left at zero; the caller owns the repository and fills it in.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            students_stored: 0,
            students_created: self.created.load(Ordering::Relaxed),
            students_updated: self.updated.load(Ordering::Relaxed),
            students_deleted: self.deleted.load(Ordering::Relaxed),
            summaries_generated: self.summaries_generated.load(Ordering::Relaxed),
            summary_failures: self.summary_failures.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of activity counters used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Records currently held by the repository.
    pub students_stored: u64,
    /// Successful creates since startup.
    pub students_created: u64,
    /// Successful updates since startup.
    pub students_updated: u64,
    /// Successful deletes since startup.
    pub students_deleted: u64,
    /// Summaries returned to callers.
    pub summaries_generated: u64,
    /// Summary requests that failed at the provider.
    pub summary_failures: u64,
}
