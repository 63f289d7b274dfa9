//! One-shot microsecond timer

use crate::clock::now_micros;
use std::time::Duration;

/// Measures time from creation until it is stopped, in microseconds.
///
/// Once stopped the measured value is frozen: further calls to [`Timer::stop`]
/// return the same value and [`Timer::elapsed`] stops advancing.
///
/// # Example
///
/// ```rust
/// use timing::Timer;
///
/// let mut timer = Timer::new();
/// // ... work ...
/// let first = timer.stop();
/// assert_eq!(timer.stop(), first);
/// ```
#[derive(Debug, Clone)]
pub struct Timer {
    /// Start tick on the [`now_micros`] timeline
    start: u64,
    /// Cached duration in microseconds, valid once `stopped` is set
    elapsed: u64,
    stopped: bool,
}

impl Timer {
    /// Create and start a timer.
    #[inline]
    pub fn new() -> Self {
        Self {
            start: now_micros(),
            elapsed: 0,
            stopped: false,
        }
    }

    /// Stop the timer and return the elapsed time.
    ///
    /// Stopping an already stopped timer returns the cached value.
    #[inline]
    pub fn stop(&mut self) -> Duration {
        if !self.stopped {
            self.elapsed = self.live_elapsed_us();
            self.stopped = true;
        }
        Duration::from_micros(self.elapsed)
    }

    /// Elapsed time: frozen when stopped, computed from now otherwise.
    ///
    /// Never mutates the timer.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        Duration::from_micros(self.elapsed_us())
    }

    /// Elapsed time in whole microseconds.
    #[inline]
    pub fn elapsed_us(&self) -> u64 {
        if self.stopped {
            self.elapsed
        } else {
            self.live_elapsed_us()
        }
    }

    /// Whether [`Timer::stop`] has been called.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Start tick in microseconds on the process-wide monotonic timeline.
    #[inline]
    pub fn start(&self) -> u64 {
        self.start
    }

    fn live_elapsed_us(&self) -> u64 {
        now_micros().saturating_sub(self.start)
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
