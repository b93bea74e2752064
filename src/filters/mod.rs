mod inspect;
mod latency;
mod map;
mod timed_moving_average;

pub use inspect::{Inspect, inspect};
pub use latency::{Latency, latency};
pub use map::{Map, clamp, deadband, map};
pub use timed_moving_average::{Sample, TimedAverageOptions, TimedMovingAverage};
