use std::sync::Arc;

use crate::metrics::MetricKind;

use super::histogram::NativeHistogram;
use super::stats::TrendStatsResolver;
use super::trend::TrendSink;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CounterSink {
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GaugeSink {
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RateSink {
    pub trues: u64,
    pub total: u64,
}

impl RateSink {
    #[must_use]
    pub fn rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.trues as f64 / self.total as f64
    }
}

/// Per-series accumulator, one variant per metric kind and trend encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Sink {
    Counter(CounterSink),
    Gauge(GaugeSink),
    Rate(RateSink),
    Trend(TrendSink),
    NativeHistogram(NativeHistogram),
}

/// What a sink reports for one flush, before labels and timestamps are
/// attached.
#[derive(Debug, Clone, PartialEq)]
pub enum Emission<'sink> {
    Value(f64),
    /// One value per configured trend stat, keyed by series suffix.
    Stats(Vec<(&'sink str, f64)>),
    Histogram(&'sink NativeHistogram),
}

impl Sink {
    pub fn add(&mut self, value: f64) {
        match self {
            Sink::Counter(counter) => counter.value += value,
            Sink::Gauge(gauge) => gauge.value = value,
            Sink::Rate(rate) => {
                rate.total = rate.total.saturating_add(1);
                if value != 0.0 {
                    rate.trues = rate.trues.saturating_add(1);
                }
            }
            Sink::Trend(trend) => trend.add(value),
            Sink::NativeHistogram(histogram) => histogram.observe(value),
        }
    }

    #[must_use]
    pub fn emit(&self) -> Emission<'_> {
        match self {
            Sink::Counter(counter) => Emission::Value(counter.value),
            Sink::Gauge(gauge) => Emission::Value(gauge.value),
            Sink::Rate(rate) => Emission::Value(rate.rate()),
            Sink::Trend(trend) => Emission::Stats(
                trend
                    .stats()
                    .iter()
                    .map(|(key, stat)| (key, stat.resolve(trend)))
                    .collect(),
            ),
            Sink::NativeHistogram(histogram) => Emission::Histogram(histogram),
        }
    }
}

/// Builds empty sinks for new series. The trend encoding is fixed when the
/// factory is created.
#[derive(Debug, Clone)]
pub struct SinkFactory {
    trend: TrendEncoding,
}

#[derive(Debug, Clone)]
enum TrendEncoding {
    Classic(Arc<TrendStatsResolver>),
    NativeHistogram { max_buckets: usize },
}

impl SinkFactory {
    #[must_use]
    pub fn classic(stats: TrendStatsResolver) -> Self {
        Self {
            trend: TrendEncoding::Classic(Arc::new(stats)),
        }
    }

    #[must_use]
    pub const fn native_histogram(max_buckets: usize) -> Self {
        Self {
            trend: TrendEncoding::NativeHistogram { max_buckets },
        }
    }

    #[must_use]
    pub fn build(&self, kind: MetricKind) -> Sink {
        match kind {
            MetricKind::Counter => Sink::Counter(CounterSink::default()),
            MetricKind::Gauge => Sink::Gauge(GaugeSink::default()),
            MetricKind::Rate => Sink::Rate(RateSink::default()),
            MetricKind::Trend => match &self.trend {
                TrendEncoding::Classic(stats) => Sink::Trend(TrendSink::new(Arc::clone(stats))),
                TrendEncoding::NativeHistogram { max_buckets } => {
                    Sink::NativeHistogram(NativeHistogram::new(*max_buckets))
                }
            },
        }
    }
}
