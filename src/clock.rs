//! Injectable tick pacing, so playback loops can be driven deterministically
//! in tests and run flat-out for offline export.

use std::time::Duration;

pub trait Clock {
    /// Blocks until the next tick should run. Cooperative: callers invoke it
    /// once between ticks, never concurrently.
    fn sleep(&mut self, period: Duration);
}

/// Wall-clock pacing for interactive playback.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&mut self, period: Duration) {
        std::thread::sleep(period);
    }
}

/// Never sleeps. Used for offline export and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateClock;

impl Clock for ImmediateClock {
    fn sleep(&mut self, _period: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingClock {
        sleeps: usize,
    }

    impl Clock for CountingClock {
        fn sleep(&mut self, _period: Duration) {
            self.sleeps += 1;
        }
    }

    #[test]
    fn clocks_are_object_safe() {
        let mut immediate = ImmediateClock;
        let mut counting = CountingClock { sleeps: 0 };
        let clocks: Vec<&mut dyn Clock> = vec![&mut immediate, &mut counting];
        for clock in clocks {
            clock.sleep(Duration::from_millis(1));
        }
        assert_eq!(counting.sleeps, 1);
    }
}
