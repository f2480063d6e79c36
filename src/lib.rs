//! Prometheus remote write output for the `strest` load tester.
//!
//! Samples produced during a run are queued in a [`output::SampleBuffer`].
//! A periodic flusher drains the queue, folds every sample into a
//! per-series sink (counter, gauge, rate or trend), and ships one point per
//! series that moved to a newer millisecond as a snappy-compressed protobuf
//! `WriteRequest`. The `strest-rw` binary wires this to JSON lines read from
//! stdin or a file.
pub mod aggregation;
pub mod args;
pub mod config;
pub mod error;
pub mod logger;
pub mod metrics;
pub mod output;
pub mod remote;
pub mod shutdown;
pub mod sinks;
