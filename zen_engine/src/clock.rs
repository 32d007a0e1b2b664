//! Fixed-cadence step gate.

use std::time::Duration;

/// Lets one simulation step through per elapsed period.
///
/// Missed periods are not caught up: however long the gap, a call that
/// steps takes exactly one step and restarts the period from `now`.
#[derive(Debug, Clone, Copy)]
pub struct SimulationClock {
    period:    Duration,
    last_step: Duration,
}

impl SimulationClock {
    pub fn new(period: Duration) -> Self {
        SimulationClock { period, last_step: Duration::ZERO }
    }

    pub fn period(&self) -> Duration { self.period }

    pub fn last_step(&self) -> Duration { self.last_step }

    /// True when more than one period has passed since the last step; the
    /// step is then recorded at `now`.
    pub fn tick(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last_step) > self.period {
            self.last_step = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration { Duration::from_millis(v) }

    #[test]
    fn steps_only_after_period() {
        let mut c = SimulationClock::new(ms(33));
        assert!(!c.tick(ms(10)));
        assert!(!c.tick(ms(33)));
        assert!(c.tick(ms(34)));
        assert_eq!(c.last_step(), ms(34));
        assert!(!c.tick(ms(60)));
        assert!(c.tick(ms(68)));
    }

    #[test]
    fn no_catch_up_after_a_stall() {
        let mut c = SimulationClock::new(ms(33));
        assert!(c.tick(ms(1000)));
        assert!(!c.tick(ms(1001)));
        assert!(!c.tick(ms(1033)));
    }

    #[test]
    fn time_going_backwards_does_not_step() {
        let mut c = SimulationClock::new(ms(33));
        c.tick(ms(500));
        assert!(!c.tick(ms(100)));
    }
}
