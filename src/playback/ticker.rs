use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of "now" for scheduling ticks.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock. Clones share the same time.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Fixed-rate deadline: armed, it fires once per `period`; cancelled, it never fires.
#[derive(Clone, Debug)]
pub struct Ticker {
    period: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    /// Schedule the first tick one period after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.next
    }

    /// Number of ticks due at `now`; the schedule advances past them.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next else {
            return 0;
        };
        if self.period.is_zero() {
            return 0;
        }
        let mut due = 0u32;
        while next <= now {
            due = due.saturating_add(1);
            next += self.period;
        }
        self.next = Some(next);
        due
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/ticker.rs"]
mod tests;
