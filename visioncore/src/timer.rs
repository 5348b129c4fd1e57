//! Frame-polled timers
//!
//! Nothing on the desktop runs on a background thread. A timer is a plain
//! value owned by the component it drives; every frame the owner polls it
//! with the current instant and reports `next_due()` to the
//! [`RepaintController`](crate::RepaintController). Dropping the owner
//! drops the timer, so a torn-down component can never be ticked.

use rand::Rng;
use std::ops::Range;
use std::time::{Duration, Instant};

/// Fixed-period repeating timer that can be paused.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next_due: Option<Instant>,
}

impl Interval {
    /// Start a running interval whose first tick is one period from `now`.
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: Some(now + period),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Stop ticking. `poll` returns 0 until resumed.
    pub fn pause(&mut self) {
        self.next_due = None;
    }

    /// Start ticking again, one full period from `now`.
    pub fn resume(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.period);
        }
    }

    /// Restart the phase so the next tick is one period from `now`.
    pub fn reset(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    /// Number of ticks that came due up to `now`.
    ///
    /// Missed ticks are collapsed into one so a long stall (window dragged,
    /// process suspended) cannot replay a burst of simulation steps.
    pub fn poll(&mut self, now: Instant) -> u32 {
        match self.next_due {
            Some(due) if now >= due => {
                let mut next = due + self.period;
                if next <= now {
                    next = now + self.period;
                }
                self.next_due = Some(next);
                1
            }
            _ => 0,
        }
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }
}

/// One-shot timer.
#[derive(Debug, Clone)]
pub struct Timeout {
    due: Option<Instant>,
}

impl Timeout {
    pub fn after(delay: Duration, now: Instant) -> Self {
        Self { due: Some(now + delay) }
    }

    /// A timeout that never fires.
    pub fn idle() -> Self {
        Self { due: None }
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Returns `true` exactly once, on the first poll at or after the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.due
    }
}

/// Self-rescheduling timer whose period is drawn at random from a range
/// each time it fires.
#[derive(Debug, Clone)]
pub struct JitterTimer {
    range: Range<Duration>,
    next_due: Instant,
}

impl JitterTimer {
    /// First firing after `first`, then every `range` (uniformly drawn).
    pub fn new(first: Duration, range: Range<Duration>, now: Instant) -> Self {
        Self {
            range,
            next_due: now + first,
        }
    }

    /// Fires at most once per call; reschedules itself from `now`.
    pub fn fire<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) -> bool {
        if now < self.next_due {
            return false;
        }
        let delay = if self.range.start >= self.range.end {
            self.range.start
        } else {
            rng.gen_range(self.range.clone())
        };
        self.next_due = now + delay;
        true
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_interval_ticks_once_per_period() {
        let t0 = Instant::now();
        let mut iv = Interval::new(120 * MS, t0);
        assert_eq!(iv.poll(t0 + 100 * MS), 0);
        assert_eq!(iv.poll(t0 + 120 * MS), 1);
        assert_eq!(iv.poll(t0 + 130 * MS), 0);
        assert_eq!(iv.poll(t0 + 240 * MS), 1);
    }

    #[test]
    fn test_interval_collapses_missed_ticks() {
        let t0 = Instant::now();
        let mut iv = Interval::new(100 * MS, t0);
        assert_eq!(iv.poll(t0 + 1000 * MS), 1);
        assert_eq!(iv.poll(t0 + 1001 * MS), 0);
        assert_eq!(iv.next_due(), Some(t0 + 1100 * MS));
    }

    #[test]
    fn test_paused_interval_never_ticks() {
        let t0 = Instant::now();
        let mut iv = Interval::new(100 * MS, t0);
        iv.pause();
        assert!(!iv.is_running());
        assert_eq!(iv.poll(t0 + 500 * MS), 0);
        assert_eq!(iv.next_due(), None);
        iv.resume(t0 + 500 * MS);
        assert_eq!(iv.poll(t0 + 550 * MS), 0);
        assert_eq!(iv.poll(t0 + 600 * MS), 1);
    }

    #[test]
    fn test_timeout_fires_once() {
        let t0 = Instant::now();
        let mut t = Timeout::after(400 * MS, t0);
        assert!(!t.fire(t0 + 399 * MS));
        assert!(t.fire(t0 + 400 * MS));
        assert!(!t.fire(t0 + 800 * MS));
    }

    #[test]
    fn test_cancelled_timeout_never_fires() {
        let t0 = Instant::now();
        let mut t = Timeout::after(10 * MS, t0);
        t.cancel();
        assert!(!t.fire(t0 + 1000 * MS));
        assert!(!Timeout::idle().is_pending());
    }

    #[test]
    fn test_jitter_stays_in_range() {
        let t0 = Instant::now();
        let mut rng = StdRng::seed_from_u64(7);
        let mut timer = JitterTimer::new(3000 * MS, 2000 * MS..6000 * MS, t0);
        assert!(!timer.fire(t0 + 2999 * MS, &mut rng));
        let mut now = t0 + 3000 * MS;
        for _ in 0..50 {
            assert!(timer.fire(now, &mut rng));
            let delay = timer.next_due() - now;
            assert!(delay >= 2000 * MS && delay < 6000 * MS);
            now = timer.next_due();
        }
    }
}
