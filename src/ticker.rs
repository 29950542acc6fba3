use std::time::{Duration, Instant};

use log::trace;

/// Handle for the periodic game tick. The host starts and stops it as the
/// game enters and leaves the running state, so at most one tick stream
/// exists at a time.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Ticker { interval, next_due: None }
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Schedules the first tick for `now`, then one every interval.
    /// Restarting a running ticker keeps its current schedule.
    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            trace!("Ticker started, interval {:?}", self.interval);
            self.next_due = Some(now);
        }
    }

    pub fn stop(&mut self) {
        if self.next_due.take().is_some() {
            trace!("Ticker stopped");
        }
    }

    /// Returns true if a tick is due at `now`, consuming it.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = match self.next_due {
            Some(due) if due <= now => due,
            _ => return false,
        };

        let next = due + self.interval;
        // Fell behind by more than a whole interval: resync instead of bursting
        self.next_due = Some(if next <= now { now + self.interval } else { next });
        true
    }
}
