use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Fixed-window admission counter shared by request handlers and the ticker.
///
/// Clones share one counter. All updates go through a single atomic, so
/// admissions and resets have one total order.
#[derive(Debug, Clone)]
pub struct AdmissionController {
    admitted: Arc<AtomicUsize>,
    limit: usize,
}

impl AdmissionController {
    pub fn new(limit: usize) -> Self {
        Self {
            admitted: Arc::new(AtomicUsize::new(0)),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn admitted_in_window(&self) -> usize {
        self.admitted.load(Ordering::Acquire)
    }

    /// Admits one request if the current window still has room.
    pub fn try_admit(&self) -> bool {
        self.admitted
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (current < self.limit).then_some(current + 1)
            })
            .is_ok()
    }

    /// Starts a new window. Returns how many requests the closed window admitted.
    pub(crate) fn reset(&self) -> usize {
        self.admitted.swap(0, Ordering::AcqRel)
    }
}
