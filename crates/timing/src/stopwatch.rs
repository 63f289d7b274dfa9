//! Pause/resume stopwatch built on [`Timer`]

use crate::timer::Timer;
use std::time::Duration;

/// A [`Timer`] that can be paused, resumed and reset.
///
/// The total only advances when an interval is closed by [`Stopwatch::pause`].
///
/// Note that [`Stopwatch::elapsed`] on a running stopwatch is not a pure read:
/// it closes the open interval, folds it into the total and opens a new one
/// starting now. Measurement continues uninterrupted, but the interval
/// boundaries move.
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    timer: Timer,
    total: Duration,
}

impl Stopwatch {
    /// Create a running stopwatch with a zero total.
    #[inline]
    pub fn new() -> Self {
        Self {
            timer: Timer::new(),
            total: Duration::ZERO,
        }
    }

    /// Pause and return the accumulated total.
    ///
    /// Pausing an already paused stopwatch adds nothing.
    pub fn pause(&mut self) -> Duration {
        if !self.timer.is_stopped() {
            self.total += self.timer.stop();
        }
        self.total
    }

    /// Whether the stopwatch is currently paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.timer.is_stopped()
    }

    /// Open a new interval if paused; no-op while running.
    pub fn resume(&mut self) {
        if self.timer.is_stopped() {
            self.timer = Timer::new();
        }
    }

    /// Accumulated total as of now.
    ///
    /// While running this performs a pause followed by a resume.
    pub fn elapsed(&mut self) -> Duration {
        if !self.is_paused() {
            self.pause();
            self.resume();
        }
        self.total
    }

    /// Accumulated total in whole microseconds, with the same folding as
    /// [`Stopwatch::elapsed`].
    pub fn elapsed_us(&mut self) -> u64 {
        self.elapsed().as_micros() as u64
    }

    /// Zero the total and restart measuring from now.
    pub fn reset(&mut self) {
        self.total = Duration::ZERO;
        self.timer = Timer::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::thread::sleep;

    #[test]
    fn test_stopwatch_accumulates_intervals() {
        let mut sw = Stopwatch::new();
        sleep(Duration::from_millis(5));
        let first = sw.pause();
        sleep(Duration::from_millis(5));
        sw.resume();
        sleep(Duration::from_millis(5));
        let total = sw.pause();

        assert!(first.as_micros() >= 5_000);
        assert!(total.as_micros() >= 10_000, "got {:?}", total);
        // The paused gap is not counted
        assert!(total >= first);
    }

    #[test]
    fn test_stopwatch_double_pause() {
        let mut sw = Stopwatch::new();
        sleep(Duration::from_millis(1));
        let first = sw.pause();
        sleep(Duration::from_millis(1));
        let second = sw.pause();

        assert!(sw.is_paused());
        assert_eq!(first, second);
    }

    #[test]
    fn test_stopwatch_resume_while_running_is_noop() {
        let mut sw = Stopwatch::new();
        let start = sw.timer.start();
        sw.resume();

        assert!(!sw.is_paused());
        assert_eq!(sw.timer.start(), start);
    }

    #[test]
    fn test_stopwatch_elapsed_folds_running_interval() {
        let mut sw = Stopwatch::new();
        sleep(Duration::from_millis(2));
        let elapsed = sw.elapsed();

        assert!(!sw.is_paused());
        assert_eq!(sw.total, elapsed);
        assert!(elapsed.as_micros() >= 2_000);
    }

    #[test]
    fn test_stopwatch_elapsed_when_paused() {
        let mut sw = Stopwatch::new();
        let paused = sw.pause();
        sleep(Duration::from_millis(2));

        assert_eq!(sw.elapsed(), paused);
        assert!(sw.is_paused());
    }

    #[test]
    fn test_stopwatch_reset() {
        let mut sw = Stopwatch::new();
        sleep(Duration::from_millis(3));
        sw.pause();
        sw.reset();

        assert!(!sw.is_paused());
        assert!(sw.elapsed() < Duration::from_millis(3));
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Pause,
        Resume,
        Elapsed,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::Pause), Just(Op::Resume), Just(Op::Elapsed)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_total_never_decreases(ops in prop::collection::vec(op_strategy(), 1..32)) {
            let mut sw = Stopwatch::new();
            let mut last = Duration::ZERO;

            for op in ops {
                match op {
                    Op::Pause => {
                        let total = sw.pause();
                        prop_assert!(sw.is_paused());
                        prop_assert!(total >= last);
                        prop_assert_eq!(sw.pause(), total);
                        last = total;
                    }
                    Op::Resume => {
                        sw.resume();
                        prop_assert!(!sw.is_paused());
                    }
                    Op::Elapsed => {
                        let was_paused = sw.is_paused();
                        let total = sw.elapsed();
                        prop_assert!(total >= last);
                        prop_assert_eq!(sw.is_paused(), was_paused);
                        last = total;
                    }
                }
            }
        }
    }
}
