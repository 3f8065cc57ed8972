#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Spatium Stats
//!
//! Constant-memory statistics over scalar streams: a rolling mean with
//! a fixed window, and a registry of incremental statistics (max, mean,
//! min, rms, max-absolute, variance) updated sample by sample.

/// Windowed mean over a stream of samples.
pub mod rolling_mean;

/// Incremental statistics over a stream of samples.
pub mod signal_stats;

pub use crate::rolling_mean::RollingMean;
pub use crate::signal_stats::{
    SignalMaxAbsoluteValue, SignalMaximum, SignalMean, SignalMinimum, SignalRootMeanSquare,
    SignalStatistic, SignalStats, SignalVariance,
};
