//! Fixed-interval ticker.
//!
//! The first tick fires one full period after start. Ticks never overlap:
//! if a pass overruns, the ticks it missed are dropped and the next deadline
//! snaps to the next future multiple of the period.

use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Poller {
    period: Duration,
    max_ticks: Option<u64>,
}

impl Poller {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            max_ticks: None,
        }
    }

    /// Stop after `n` ticks instead of running forever.
    pub fn with_max_ticks(mut self, n: u64) -> Self {
        self.max_ticks = Some(n);
        self
    }

    /// Block the current thread, calling `on_tick` with the tick number
    /// (starting at 1) on every tick. Returns the number of ticks fired,
    /// which only happens when a tick limit is set.
    pub fn run<F: FnMut(u64)>(&self, mut on_tick: F) -> u64 {
        let mut fired = 0;
        let mut deadline = Instant::now() + self.period;
        loop {
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }

            fired += 1;
            on_tick(fired);
            if self.max_ticks.is_some_and(|max| fired >= max) {
                return fired;
            }

            let (next, dropped) = next_deadline(deadline, Instant::now(), self.period);
            if dropped > 0 {
                debug!(dropped, "pass overran poll period, dropping ticks");
            }
            deadline = next;
        }
    }
}

/// Advance `deadline` by whole periods until it is in the future relative
/// to `now`. Returns the new deadline and how many ticks were skipped.
pub fn next_deadline(deadline: Instant, now: Instant, period: Duration) -> (Instant, u64) {
    let mut next = deadline + period;
    let mut dropped = 0;
    while next <= now {
        next += period;
        dropped += 1;
    }
    (next, dropped)
}
