//! Game timing
//!
//! A stopwatch measuring a game's elapsed time, and a cancellable periodic
//! ticker that drives the elapsed-time display.

use std::time::{Duration, Instant};

/// Display refresh period
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Elapsed time since a game started, frozen once stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stopwatch {
    started: Instant,
    stopped: Option<Instant>,
}

impl Stopwatch {
    /// Start a stopwatch now
    #[must_use]
    pub fn start() -> Self {
        Self::start_at(Instant::now())
    }

    #[must_use]
    pub const fn start_at(started: Instant) -> Self {
        Self {
            started,
            stopped: None,
        }
    }

    /// Freeze the stopwatch; later calls keep the first stop time
    pub fn stop(&mut self) {
        self.stop_at(Instant::now());
    }

    pub fn stop_at(&mut self, now: Instant) {
        if self.stopped.is_none() {
            self.stopped = Some(now.max(self.started));
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped.is_some()
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    /// Elapsed time as seen at `now`; ignores `now` once stopped
    #[must_use]
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        self.stopped
            .unwrap_or(now)
            .saturating_duration_since(self.started)
    }

    /// Whole seconds elapsed
    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed().as_secs()
    }
}

/// A cancellable periodic tick
///
/// The ticker never runs on its own: the owner polls it from the event loop
/// and it reports whether a tick is due. Each tick is reported at most once.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next: Option<Instant>,
    ticks: u64,
}

impl Ticker {
    /// A stopped ticker
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            next: None,
            ticks: 0,
        }
    }

    /// Start (or restart) the tick stream; any pending tick is dropped
    pub fn restart(&mut self, now: Instant) {
        self.next = Some(now + self.period);
        self.ticks = 0;
    }

    /// Stop ticking; no tick is reported until the next `restart`
    pub fn cancel(&mut self) {
        self.next = None;
    }

    #[inline]
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// Ticks reported since the last restart
    #[inline]
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Report whether a tick is due at `now` and schedule the next one
    ///
    /// Missed periods collapse into a single tick.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next {
            Some(deadline) if deadline <= now => {
                let mut next = deadline + self.period;
                if next <= now {
                    next = now + self.period;
                }
                self.next = Some(next);
                self.ticks += 1;
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick, `None` when cancelled
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next.map(|deadline| deadline.saturating_duration_since(now))
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopwatch_runs_until_stopped() {
        let t0 = Instant::now();
        let mut watch = Stopwatch::start_at(t0);

        assert_eq!(watch.elapsed_at(t0 + Duration::from_secs(5)), Duration::from_secs(5));
        assert!(!watch.is_stopped());

        watch.stop_at(t0 + Duration::from_secs(7));
        assert!(watch.is_stopped());
        assert_eq!(watch.elapsed_at(t0 + Duration::from_secs(60)), Duration::from_secs(7));
    }

    #[test]
    fn stopwatch_keeps_first_stop() {
        let t0 = Instant::now();
        let mut watch = Stopwatch::start_at(t0);
        watch.stop_at(t0 + Duration::from_secs(3));
        watch.stop_at(t0 + Duration::from_secs(9));
        assert_eq!(watch.elapsed_at(t0 + Duration::from_secs(20)), Duration::from_secs(3));
    }

    #[test]
    fn ticker_idle_until_restarted() {
        let t0 = Instant::now();
        let mut ticker = Ticker::default();
        assert!(!ticker.is_running());
        assert!(!ticker.poll(t0 + Duration::from_secs(10)));
        assert_eq!(ticker.time_until_next(t0), None);
    }

    #[test]
    fn ticker_fires_once_per_period() {
        let t0 = Instant::now();
        let mut ticker = Ticker::default();
        ticker.restart(t0);

        assert!(!ticker.poll(t0 + Duration::from_millis(500)));
        assert!(ticker.poll(t0 + Duration::from_secs(1)));
        assert!(!ticker.poll(t0 + Duration::from_millis(1500)));
        assert!(ticker.poll(t0 + Duration::from_secs(2)));
        assert_eq!(ticker.ticks(), 2);
    }

    #[test]
    fn ticker_collapses_missed_periods() {
        let t0 = Instant::now();
        let mut ticker = Ticker::default();
        ticker.restart(t0);

        assert!(ticker.poll(t0 + Duration::from_secs(5)));
        assert!(!ticker.poll(t0 + Duration::from_millis(5500)));
        assert!(ticker.poll(t0 + Duration::from_secs(6)));
    }

    #[test]
    fn ticker_cancel_stops_ticks() {
        let t0 = Instant::now();
        let mut ticker = Ticker::default();
        ticker.restart(t0);
        ticker.cancel();

        assert!(!ticker.is_running());
        assert!(!ticker.poll(t0 + Duration::from_secs(3)));
    }

    #[test]
    fn ticker_restart_replaces_pending_tick() {
        let t0 = Instant::now();
        let mut ticker = Ticker::default();
        ticker.restart(t0);
        assert!(ticker.poll(t0 + Duration::from_secs(1)));

        ticker.restart(t0 + Duration::from_millis(1900));
        assert_eq!(ticker.ticks(), 0);
        // The old stream would have fired at t0 + 2s
        assert!(!ticker.poll(t0 + Duration::from_secs(2)));
        assert!(ticker.poll(t0 + Duration::from_millis(2900)));
    }

    #[test]
    fn ticker_time_until_next() {
        let t0 = Instant::now();
        let mut ticker = Ticker::default();
        ticker.restart(t0);
        assert_eq!(
            ticker.time_until_next(t0 + Duration::from_millis(400)),
            Some(Duration::from_millis(600))
        );
        assert_eq!(
            ticker.time_until_next(t0 + Duration::from_secs(3)),
            Some(Duration::ZERO)
        );
    }
}
