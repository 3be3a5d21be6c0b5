use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Shared run flag polled by the producer once per iteration.
///
/// Starts running and only ever transitions to stopped.
#[derive(Debug)]
pub struct RunState {
    running: AtomicBool,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            running: AtomicBool::new(true),
        }
    }
}

impl RunState {
    /// Return `true` until [`RunState::stop`] is called.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Request shutdown. Idempotent.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }
}

/// Live frame accounting shared by producer and consumer.
#[derive(Debug, Default)]
pub struct PipelineStats {
    generated: AtomicU64,
    consumed: AtomicU64,
    released_at_shutdown: AtomicU64,
    conversion_failures: AtomicU64,
    alloc_failures: AtomicU64,
}

/// Point-in-time copy of [`PipelineStats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Frames the producer appended to the sequence.
    pub generated: u64,
    /// Frames the consumer took off the sequence (converted or not).
    pub consumed: u64,
    /// Frames still pending when the pipeline shut down.
    pub released_at_shutdown: u64,
    /// Consumed frames whose display resource could not be created.
    pub conversion_failures: u64,
    /// Timestamps skipped because a frame buffer could not be allocated.
    pub alloc_failures: u64,
}

impl StatsSnapshot {
    /// Every generated frame was either consumed or released at shutdown.
    pub fn is_balanced(&self) -> bool {
        self.generated == self.consumed + self.released_at_shutdown
    }
}

impl PipelineStats {
    pub(crate) fn record_generated(&self) {
        self.generated.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_consumed(&self, n: u64) {
        self.consumed.fetch_add(n, Ordering::Relaxed);
    }

    pub(crate) fn record_released(&self, n: u64) {
        self.released_at_shutdown.fetch_add(n, Ordering::Relaxed);
    }

    pub(crate) fn record_conversion_failure(&self) {
        self.conversion_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_alloc_failure(&self) {
        self.alloc_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy the current counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            generated: self.generated.load(Ordering::Relaxed),
            consumed: self.consumed.load(Ordering::Relaxed),
            released_at_shutdown: self.released_at_shutdown.load(Ordering::Relaxed),
            conversion_failures: self.conversion_failures.load(Ordering::Relaxed),
            alloc_failures: self.alloc_failures.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/state.rs"]
mod tests;
