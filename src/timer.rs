use std::time::{Duration, Instant};

use tracing::debug;

/// Shortest period a clock accepts; anything below is raised to this.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Identifies one arming of the countdown clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockId(u64);

#[derive(Debug, Clone, Copy)]
struct Armed {
    id: ClockId,
    next_fire: Instant,
}

/// Repeating clock that owns at most one armed instance.
///
/// Arming always cancels whatever was armed before, so two runs can never
/// share a clock.
#[derive(Debug)]
pub struct Countdown {
    period: Duration,
    armed: Option<Armed>,
    next_id: u64,
}

impl Countdown {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            armed: None,
            next_id: 0,
        }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    pub fn arm(&mut self, now: Instant) -> ClockId {
        self.cancel();

        self.next_id += 1;
        let id = ClockId(self.next_id);
        self.armed = Some(Armed {
            id,
            next_fire: now + self.period,
        });
        debug!(clock = id.0, "countdown armed");
        id
    }

    /// Disarm the clock. Returns whether one was armed.
    pub fn cancel(&mut self) -> bool {
        match self.armed.take() {
            Some(armed) => {
                debug!(clock = armed.id.0, "countdown cancelled");
                true
            }
            None => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn active(&self) -> Option<ClockId> {
        self.armed.map(|a| a.id)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of whole periods that elapsed up to `now`.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(armed) = self.armed.as_mut() else {
            return 0;
        };

        if armed.next_fire > now {
            return 0;
        }

        let late = now.duration_since(armed.next_fire).as_nanos() / self.period.as_nanos();
        let fired = u32::try_from(late.saturating_add(1)).unwrap_or(u32::MAX);
        armed.next_fire += self.period.saturating_mul(fired);
        fired
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::every_second()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_clock_never_fires() {
        let mut clock = Countdown::every_second();
        let now = Instant::now();

        assert!(!clock.is_armed());
        assert_eq!(clock.poll(now + Duration::from_secs(10)), 0);
    }

    #[test]
    fn test_poll_counts_whole_periods() {
        let mut clock = Countdown::every_second();
        let t0 = Instant::now();
        clock.arm(t0);

        assert_eq!(clock.poll(t0 + Duration::from_millis(999)), 0);
        assert_eq!(clock.poll(t0 + Duration::from_millis(1000)), 1);
        assert_eq!(clock.poll(t0 + Duration::from_millis(1500)), 0);
        assert_eq!(clock.poll(t0 + Duration::from_millis(4200)), 3);
    }

    #[test]
    fn test_arm_replaces_previous_clock() {
        let mut clock = Countdown::every_second();
        let t0 = Instant::now();
        let first = clock.arm(t0);
        let second = clock.arm(t0 + Duration::from_millis(500));

        assert_ne!(first, second);
        assert_eq!(clock.active(), Some(second));
        // the first clock's deadline at t0+1s no longer fires
        assert_eq!(clock.poll(t0 + Duration::from_millis(1200)), 0);
        assert_eq!(clock.poll(t0 + Duration::from_millis(1500)), 1);
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let mut clock = Countdown::new(Duration::ZERO);
        assert_eq!(clock.period(), MIN_PERIOD);

        let t0 = Instant::now();
        clock.arm(t0);
        assert_eq!(clock.poll(t0), 0);
        assert_eq!(clock.poll(t0 + Duration::from_millis(10)), 10);
        assert_eq!(clock.poll(t0 + Duration::from_millis(10)), 0);
    }

    #[test]
    fn test_long_gap_fires_in_one_poll() {
        let mut clock = Countdown::every_second();
        let t0 = Instant::now();
        clock.arm(t0);

        assert_eq!(clock.poll(t0 + Duration::from_secs(3600)), 3600);
        assert_eq!(clock.poll(t0 + Duration::from_millis(3_600_999)), 0);
        assert_eq!(clock.poll(t0 + Duration::from_secs(3601)), 1);
    }

    #[test]
    fn test_cancel() {
        let mut clock = Countdown::every_second();
        let t0 = Instant::now();
        clock.arm(t0);

        assert!(clock.cancel());
        assert!(!clock.cancel());
        assert_eq!(clock.poll(t0 + Duration::from_secs(5)), 0);
    }
}
