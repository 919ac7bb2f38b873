use std::time::Instant;

/// Emits a debug event with the elapsed wall time when dropped.
///
/// Purely observational; with no subscriber installed the events go nowhere.
pub(crate) struct ExecutionTimer {
    label: &'static str,
    start: Instant,
}

impl ExecutionTimer {
    pub(crate) fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for ExecutionTimer {
    fn drop(&mut self) {
        tracing::debug!(target: "uep_core::timing", elapsed = ?self.start.elapsed(), "{}", self.label);
    }
}
