use std::collections::BTreeMap;

use crate::aggregation::{SeriesState, SeriesTable};
use crate::metrics::SeriesKey;
use crate::sinks::{Emission, NativeHistogram};

use super::prompb::{BucketSpan, Histogram, Label, Sample, TimeSeries, histogram};

pub const NAME_LABEL: &str = "__name__";

/// Turns series that advanced in a flush into remote write time series.
#[derive(Debug, Clone)]
pub struct SeriesEncoder {
    prefix: String,
}

impl SeriesEncoder {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Encodes the given series, sorted by their label sets. Keys missing
    /// from the table are skipped.
    #[must_use]
    pub fn encode(&self, table: &SeriesTable, advanced: &[SeriesKey]) -> Vec<TimeSeries> {
        let mut encoded = Vec::with_capacity(advanced.len());
        for key in advanced {
            let Some(state) = table.get(key) else {
                continue;
            };
            self.encode_series(key, state, &mut encoded);
        }
        encoded.sort_by(|lhs, rhs| {
            lhs.labels
                .iter()
                .map(|label| (&label.name, &label.value))
                .cmp(rhs.labels.iter().map(|label| (&label.name, &label.value)))
        });
        encoded
    }

    fn encode_series(&self, key: &SeriesKey, state: &SeriesState, out: &mut Vec<TimeSeries>) {
        let timestamp = state.latest_millis();
        match state.sink().emit() {
            Emission::Value(value) => out.push(TimeSeries {
                labels: labels(key, &self.metric_name(key, None)),
                samples: vec![Sample { value, timestamp }],
                histograms: Vec::new(),
            }),
            Emission::Stats(stats) => {
                for (suffix, value) in stats {
                    out.push(TimeSeries {
                        labels: labels(key, &self.metric_name(key, Some(suffix))),
                        samples: vec![Sample { value, timestamp }],
                        histograms: Vec::new(),
                    });
                }
            }
            Emission::Histogram(native) => out.push(TimeSeries {
                labels: labels(key, &self.metric_name(key, None)),
                samples: Vec::new(),
                histograms: vec![histogram_point(native, timestamp)],
            }),
        }
    }

    fn metric_name(&self, key: &SeriesKey, suffix: Option<&str>) -> String {
        match suffix {
            Some(suffix) => format!("{}{}_{}", self.prefix, key.name(), suffix),
            None => format!("{}{}", self.prefix, key.name()),
        }
    }
}

/// Tags plus `__name__`, sorted by label name. A tag called `__name__` is
/// replaced by the metric name.
#[must_use]
pub fn labels(key: &SeriesKey, metric_name: &str) -> Vec<Label> {
    let mut labels: Vec<Label> = key
        .tags()
        .iter()
        .filter(|(name, _)| name.as_str() != NAME_LABEL)
        .map(|(name, value)| Label {
            name: name.clone(),
            value: value.clone(),
        })
        .collect();
    labels.push(Label {
        name: NAME_LABEL.to_owned(),
        value: metric_name.to_owned(),
    });
    labels.sort_by(|lhs, rhs| lhs.name.cmp(&rhs.name));
    labels
}

#[must_use]
pub fn histogram_point(native: &NativeHistogram, timestamp: i64) -> Histogram {
    let (positive_spans, positive_deltas) = spans_and_deltas(native.positive_buckets());
    let (negative_spans, negative_deltas) = spans_and_deltas(native.negative_buckets());
    Histogram {
        count: Some(histogram::Count::CountInt(native.count())),
        sum: native.sum(),
        schema: native.schema(),
        zero_threshold: native.zero_threshold(),
        zero_count: Some(histogram::ZeroCount::ZeroCountInt(native.zero_count())),
        negative_spans,
        negative_deltas,
        positive_spans,
        positive_deltas,
        reset_hint: histogram::ResetHint::Unknown.into(),
        timestamp,
    }
}

/// Sparse buckets as spans of consecutive indexes plus delta-encoded counts.
pub(crate) fn spans_and_deltas(buckets: &BTreeMap<i32, u64>) -> (Vec<BucketSpan>, Vec<i64>) {
    let mut spans: Vec<BucketSpan> = Vec::new();
    let mut deltas = Vec::with_capacity(buckets.len());
    let mut previous_index: Option<i32> = None;
    let mut previous_count: i64 = 0;

    for (&index, &count) in buckets {
        let count = i64::try_from(count).unwrap_or(i64::MAX);
        match (previous_index, spans.last_mut()) {
            (Some(previous), Some(span)) if index == previous.saturating_add(1) => {
                span.length = span.length.saturating_add(1);
            }
            (Some(previous), _) => spans.push(BucketSpan {
                offset: index.saturating_sub(previous).saturating_sub(1),
                length: 1,
            }),
            (None, _) => spans.push(BucketSpan {
                offset: index,
                length: 1,
            }),
        }
        deltas.push(count.saturating_sub(previous_count));
        previous_count = count;
        previous_index = Some(index);
    }

    (spans, deltas)
}
