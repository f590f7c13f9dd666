use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestStats {
    pub admitted: u64,
    pub rejected: u64,
    pub persisted: u64,
    pub storage_failures: u64,
    pub decode_failures: u64,
    pub windows_closed: u64,
}

/// Process-wide ingestion counters. Cheap to share behind an `Arc`.
#[derive(Debug)]
pub struct IngestMonitor {
    admitted: AtomicU64,
    rejected: AtomicU64,
    persisted: AtomicU64,
    storage_failures: AtomicU64,
    decode_failures: AtomicU64,
    windows_closed: AtomicU64,
    start_time: Instant,
}

impl IngestMonitor {
    pub fn new() -> Self {
        Self {
            admitted: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            persisted: AtomicU64::new(0),
            storage_failures: AtomicU64::new(0),
            decode_failures: AtomicU64::new(0),
            windows_closed: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_admitted(&self) {
        self.admitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_persisted(&self) {
        self.persisted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_storage_failure(&self) {
        self.storage_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_decode_failure(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_window_closed(&self, admitted_in_window: usize, limit: usize) {
        let windows = self.windows_closed.fetch_add(1, Ordering::Relaxed) + 1;
        if admitted_in_window > 0 {
            tracing::debug!(
                window = windows,
                admitted = admitted_in_window,
                limit,
                "admission window closed"
            );
        }
    }

    pub fn snapshot(&self) -> IngestStats {
        IngestStats {
            admitted: self.admitted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            persisted: self.persisted.load(Ordering::Relaxed),
            storage_failures: self.storage_failures.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
            windows_closed: self.windows_closed.load(Ordering::Relaxed),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn log_final_stats(&self) {
        let stats = self.snapshot();
        tracing::info!(
            "📊 Final Stats - Uptime: {:?}, Admitted: {}, Rejected: {}, Persisted: {}, Storage failures: {}, Decode failures: {}",
            self.uptime(),
            stats.admitted,
            stats.rejected,
            stats.persisted,
            stats.storage_failures,
            stats.decode_failures
        );
    }
}

impl Default for IngestMonitor {
    fn default() -> Self {
        Self::new()
    }
}
