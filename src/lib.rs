//! Time-windowed smoothing filters for conditioning noisy control signals.
//!
//! Every filter implements [`Filter`], a single `get(next) -> filtered`
//! operation, and filters compose with [`FilterExt::then`] or [`chain!`].
//! The main filter is [`TimedMovingAverage`], which averages the samples
//! received in the last N seconds of wall-clock time, weighting each by the
//! interval it covers.

pub mod clock;
mod error;
mod filter;
mod filters;
mod macros;
pub mod measure;

pub use crate::clock::{ElapsedTime, ManualClock, StopWatch};
pub use crate::error::FilterError;
pub use crate::filter::{Chain, Filter, FilterExt};
pub use crate::filters::*;
