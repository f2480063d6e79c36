//! Per-series accumulators for each metric kind.
//!
//! Counters sum, gauges keep the last value, rates count non-zero samples
//! against all samples, and trends either keep every observation (classic,
//! emitting one series per configured stat) or fold them into a bounded
//! exponential histogram.
mod histogram;
mod sink;
mod stats;
mod trend;

#[cfg(test)]
mod tests;

pub use histogram::{
    DEFAULT_MAX_BUCKETS, DEFAULT_SCHEMA, DEFAULT_ZERO_THRESHOLD, MIN_SCHEMA, NativeHistogram,
    bucket_upper_bound,
};
pub use sink::{CounterSink, Emission, GaugeSink, RateSink, Sink, SinkFactory};
pub use stats::{TrendStat, TrendStatsResolver};
pub use trend::TrendSink;
