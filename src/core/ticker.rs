use crate::config::MAX_WINDOW;
use crate::core::admission::AdmissionController;
use crate::utils::monitor::IngestMonitor;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

const MIN_PERIOD: Duration = Duration::from_millis(1);
const MAX_PERIOD: Duration = MAX_WINDOW;

/// Background schedule that opens a fresh admission window every `period`.
///
/// The first window opens synchronously inside [`WindowTicker::start`]; the
/// task then resets at `period`, `2 * period`, ... for as long as the runtime
/// lives. Dropping the handle does not stop the schedule.
#[derive(Debug)]
pub struct WindowTicker {
    period: Duration,
    handle: JoinHandle<()>,
}

impl WindowTicker {
    /// Must be called from within a tokio runtime.
    pub fn start(
        admission: AdmissionController,
        monitor: Arc<IngestMonitor>,
        period: Duration,
    ) -> Self {
        let period = period.clamp(MIN_PERIOD, MAX_PERIOD);
        admission.reset();
        let now = Instant::now();
        let first_boundary = now.checked_add(period).unwrap_or(now);

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(first_boundary, period);
            loop {
                ticker.tick().await;
                let admitted = admission.reset();
                monitor.record_window_closed(admitted, admission.limit());
            }
        });

        tracing::debug!("Admission window ticker started with period {:?}", period);
        Self { period, handle }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}
