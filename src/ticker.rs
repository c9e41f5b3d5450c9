use std::time::{Duration, Instant};

/// A stoppable fixed-period timer owned by whoever drives the game loop.
///
/// Nothing fires on its own: the loop asks how long it may wait (`timeout`) and
/// then whether a tick is due (`poll`). Starting a running ticker or stopping a
/// stopped one is a no-op.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Ticker { period, next_due: None }
    }

    /// The first tick is due one full period after `now`.
    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.period);
        }
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left until the next tick, `None` while stopped.
    pub fn timeout(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Reports at most one tick per call. A loop that fell behind by several
    /// periods gets a single tick and is rescheduled from `now`, never a burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = match self.next_due {
            Some(due) if due <= now => due,
            _ => return false,
        };

        let next = due + self.period;
        self.next_due = Some(if next > now { next } else { now + self.period });
        true
    }
}
