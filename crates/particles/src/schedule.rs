//! Cooperative tick scheduling primitives.
//!
//! The animation runs on a fixed-rate timer owned by the driver; these
//! types carry the two pieces of policy the core defines: how the next
//! tick is spaced after the previous one, and how the loop is cancelled.
//! Cancellation is polled once per tick boundary — an in-flight tick is
//! never aborted mid-frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Spacing policy for a fixed-rate tick loop.
#[derive(Debug, Clone, Copy)]
pub struct TickPacer {
    rate: Duration,
}

impl TickPacer {
    pub fn new(rate: Duration) -> Self {
        Self { rate }
    }

    pub fn rate(&self) -> Duration {
        self.rate
    }

    /// Delay before the next tick, measured from the end of the one that
    /// just ran for `elapsed`. The delay never drops below the full rate,
    /// so a tick that overruns pushes the whole schedule later instead of
    /// letting ticks pile up: the loop self-throttles.
    pub fn delay_after(&self, elapsed: Duration) -> Duration {
        self.rate.max(self.rate.saturating_sub(elapsed))
    }
}

/// Shared cancellation flag. Clones observe the same flag, so a signal
/// handler or UI callback can stop a loop running elsewhere; consumers
/// only poll it at tick boundaries.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_never_below_rate() {
        let pacer = TickPacer::new(Duration::from_millis(40));
        assert_eq!(
            pacer.delay_after(Duration::from_millis(0)),
            Duration::from_millis(40)
        );
        assert_eq!(
            pacer.delay_after(Duration::from_millis(15)),
            Duration::from_millis(40)
        );
        // Overrunning tick: still a full-rate pause before the next one.
        assert_eq!(
            pacer.delay_after(Duration::from_millis(400)),
            Duration::from_millis(40)
        );
    }

    #[test]
    fn test_cancel_flag_is_shared() {
        let flag = CancelFlag::new();
        let observer = flag.clone();
        assert!(!observer.is_cancelled());
        flag.cancel();
        assert!(observer.is_cancelled());
    }
}
