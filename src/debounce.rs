//! Burst suppression for high-frequency signals.
//!
//! The debouncer is a plain value driven by timestamps, so the caller owns the
//! clock and any timer. Each call pushes the quiet deadline `wait_ms` further
//! out. Leading mode fires on the first call of a burst; calls it holds back
//! are replayed once by [`Debouncer::flush`] when the caller's timer sees the
//! burst quiet. Trailing mode only fires from `flush`.

use crate::config::DebounceConfig;

#[derive(Clone, Debug)]
pub struct Debouncer {
    wait_ms: f64,
    immediate: bool,
    quiet_at: Option<f64>,
    trailing_pending: bool,
}

impl Debouncer {
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            wait_ms: config.wait_ms,
            immediate: config.immediate,
            quiet_at: None,
            trailing_pending: false,
        }
    }

    /// True while a burst that started before `now` has not quieted.
    pub fn in_burst(&self, now: f64) -> bool {
        self.quiet_at.is_some_and(|t| now < t)
    }

    /// A held-back call is waiting for [`Debouncer::flush`].
    pub fn has_pending(&self) -> bool {
        self.trailing_pending
    }

    /// Registers a trigger at `now`; returns whether the handler runs now.
    pub fn call(&mut self, now: f64) -> bool {
        let call_now = self.immediate && !self.in_burst(now);
        self.quiet_at = Some(now + self.wait_ms);
        self.trailing_pending = !call_now;
        call_now
    }

    /// The suppression timer expired; returns whether a held-back call runs.
    pub fn flush(&mut self) -> bool {
        self.quiet_at = None;
        std::mem::take(&mut self.trailing_pending)
    }
}
