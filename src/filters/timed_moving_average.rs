use crate::clock::{ElapsedTime, StopWatch};
use crate::error::FilterError;
use crate::filter::Filter;
use bytemuck::{Pod, Zeroable};
use spdlog::{debug, warn};
use std::collections::VecDeque;
use std::time::Duration;

/// One buffered observation, pre-weighted by how long it was current.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Sample {
    /// `value * dt`
    pub weighted_value: f64,
    /// Seconds elapsed before this sample arrived.
    pub dt: f64,
}

impl Sample {
    #[inline(always)]
    pub fn new(value: f64, dt: f64) -> Self {
        Self {
            weighted_value: value * dt,
            dt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedAverageOptions {
    /// Length of the trailing window, in seconds.
    pub window_seconds: f64,
    /// Number of samples to reserve up front. A control loop running at
    /// `rate_hz` needs about `window_seconds * rate_hz + 1`.
    pub capacity: usize,
}

impl Default for TimedAverageOptions {
    fn default() -> Self {
        Self {
            window_seconds: 1.0,
            capacity: 64,
        }
    }
}

/// Moving average over the samples received in the last `window_seconds`.
///
/// Each sample is weighted by the real time elapsed since the previous call,
/// so the output approximates the time-integral average of the input and is
/// insensitive to jitter in the caller's period. Running sums keep the cost of
/// a call proportional to the number of samples it evicts.
pub struct TimedMovingAverage<C: ElapsedTime = StopWatch> {
    clock: C,
    window_seconds: f64,
    samples: VecDeque<Sample>,
    total_weighted_value: f64,
    total_time: f64,
    /// Time measured for rejected samples, owed to the next accepted one.
    carried_time: f64,
}

impl TimedMovingAverage<StopWatch> {
    pub fn new(window_seconds: f64) -> Result<Self, FilterError> {
        Self::with_clock(window_seconds, StopWatch::new())
    }

    pub fn from_duration(window: Duration) -> Result<Self, FilterError> {
        Self::new(window.as_secs_f64())
    }
}

impl<C: ElapsedTime> TimedMovingAverage<C> {
    pub fn with_clock(window_seconds: f64, clock: C) -> Result<Self, FilterError> {
        Self::with_options(
            TimedAverageOptions {
                window_seconds,
                ..Default::default()
            },
            clock,
        )
    }

    pub fn with_options(options: TimedAverageOptions, mut clock: C) -> Result<Self, FilterError> {
        let window_seconds = options.window_seconds;
        if !window_seconds.is_finite() || window_seconds <= 0.0 {
            return Err(FilterError::InvalidArgument {
                name: "window_seconds",
                value: window_seconds,
            });
        }

        // Start timing from construction.
        clock.lap();
        debug!(
            "TimedMovingAverage: window={}s, capacity={}",
            window_seconds, options.capacity
        );

        Ok(Self {
            clock,
            window_seconds,
            samples: VecDeque::with_capacity(options.capacity),
            total_weighted_value: 0.0,
            total_time: 0.0,
            carried_time: 0.0,
        })
    }

    /// Like [`Filter::get`], but reports a rejected input instead of
    /// skipping it.
    ///
    /// Non-finite inputs are rejected before the clock is read. Finite inputs
    /// whose weighted value, or whose contribution to the running sum,
    /// overflows are rejected after measuring; their interval is carried over.
    /// Either way the skipped interval is credited to the next accepted sample
    /// and the running sums stay finite.
    pub fn try_get(&mut self, next: f64) -> Result<f64, FilterError> {
        if !next.is_finite() {
            return Err(FilterError::NonFiniteInput(next));
        }

        let dt = self.measure();
        let sample = Sample::new(next, dt);
        if !sample.weighted_value.is_finite() {
            self.carried_time = dt;
            return Err(FilterError::Overflow { value: next, dt });
        }

        self.evict(dt);
        if !(self.total_weighted_value + sample.weighted_value).is_finite() {
            self.carried_time = dt;
            return Err(FilterError::Overflow { value: next, dt });
        }

        self.insert(sample);
        Ok(self.average())
    }

    /// The current weighted average, or `0.0` when no time is buffered.
    #[inline(always)]
    pub fn average(&self) -> f64 {
        if self.total_time <= 0.0 {
            0.0
        } else {
            self.total_weighted_value / self.total_time
        }
    }

    pub fn window_seconds(&self) -> f64 {
        self.window_seconds
    }

    /// Sum of the `dt` of every buffered sample.
    pub fn buffered_time(&self) -> f64 {
        self.total_time
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> impl ExactSizeIterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Drops every buffered sample and starts a new clock lap.
    pub fn reset(&mut self) {
        self.samples.clear();
        self.total_weighted_value = 0.0;
        self.total_time = 0.0;
        self.carried_time = 0.0;
        self.clock.lap();
    }

    #[inline(always)]
    fn measure(&mut self) -> f64 {
        let lap = self.clock.lap();
        let lap = if lap >= 0.0 && lap.is_finite() {
            lap
        } else {
            warn!("TimedMovingAverage: clock reported {}s, clamping to 0", lap);
            0.0
        };
        std::mem::take(&mut self.carried_time) + lap
    }

    /// Pops the oldest samples while the buffered time, counting the `dt`
    /// about to be inserted, exceeds the window.
    ///
    /// Counting the incoming `dt` (rather than the stored total alone) is what
    /// makes a 0.5s sample followed by a 0.9s one in a 1s window report only
    /// the newer value.
    #[inline(always)]
    fn evict(&mut self, incoming_dt: f64) {
        while self.total_time + incoming_dt > self.window_seconds {
            let Some(oldest) = self.samples.pop_front() else {
                break;
            };
            self.total_weighted_value -= oldest.weighted_value;
            self.total_time -= oldest.dt;
        }

        if self.samples.is_empty() {
            self.total_weighted_value = 0.0;
            self.total_time = 0.0;
        }
    }

    #[inline(always)]
    fn insert(&mut self, sample: Sample) {
        self.total_weighted_value += sample.weighted_value;
        self.total_time += sample.dt;
        self.samples.push_back(sample);
    }
}

impl<C: ElapsedTime> Filter for TimedMovingAverage<C> {
    #[inline(always)]
    fn get(&mut self, next: f64) -> f64 {
        match self.try_get(next) {
            Ok(average) => average,
            Err(err) => {
                warn!("TimedMovingAverage: {}", err);
                self.average()
            }
        }
    }
}
