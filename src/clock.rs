use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering::Relaxed;
use std::time::{Duration, Instant};

/// A source of elapsed time measured in laps.
///
/// Each call to [`lap`](ElapsedTime::lap) returns the seconds elapsed since the
/// previous call (or since creation) and starts a new lap.
pub trait ElapsedTime {
    fn lap(&mut self) -> f64;
}

/// Wall-clock stopwatch backed by [`Instant`].
#[derive(Debug, Clone)]
pub struct StopWatch {
    last_instant: Instant,
}

impl StopWatch {
    pub fn new() -> Self {
        Self {
            last_instant: Instant::now(),
        }
    }

    /// Seconds since the current lap started, without resetting it.
    pub fn peek(&self) -> f64 {
        self.last_instant.elapsed().as_secs_f64()
    }
}

impl Default for StopWatch {
    fn default() -> Self {
        Self::new()
    }
}

impl ElapsedTime for StopWatch {
    #[inline(always)]
    fn lap(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_instant);
        self.last_instant = now;
        elapsed.as_secs_f64()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same pending time, so a driver can keep one handle and
/// hand another to a filter. Used for replaying recorded traces and for
/// deterministic tests.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    pending_bits: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `seconds` to the current lap.
    pub fn advance(&self, seconds: f64) {
        let mut current = self.pending_bits.load(Relaxed);
        loop {
            let next = (f64::from_bits(current) + seconds).to_bits();
            match self
                .pending_bits
                .compare_exchange_weak(current, next, Relaxed, Relaxed)
            {
                Ok(_) => break,
                Err(actual) => current = actual,
            }
        }
    }

    pub fn advance_by(&self, duration: Duration) {
        self.advance(duration.as_secs_f64());
    }

    /// Seconds accumulated in the current lap.
    pub fn pending(&self) -> f64 {
        f64::from_bits(self.pending_bits.load(Relaxed))
    }
}

impl ElapsedTime for ManualClock {
    #[inline(always)]
    fn lap(&mut self) -> f64 {
        f64::from_bits(self.pending_bits.swap(0.0f64.to_bits(), Relaxed))
    }
}
