use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::MetricsError;

/// Tags attached to a series, kept sorted by key.
pub type TagSet = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Counter,
    Gauge,
    Rate,
    Trend,
}

impl MetricKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Rate => "rate",
            MetricKind::Trend => "trend",
        }
    }
}

impl FromStr for MetricKind {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "counter" => Ok(MetricKind::Counter),
            "gauge" => Ok(MetricKind::Gauge),
            "rate" => Ok(MetricKind::Rate),
            "trend" => Ok(MetricKind::Trend),
            _ => Err(MetricsError::UnknownKind {
                value: s.to_owned(),
            }),
        }
    }
}

/// Identity of a time series: metric name, kind and tag set.
///
/// Cloning is cheap; the name and tags are shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesKey {
    name: Arc<str>,
    kind: MetricKind,
    tags: Arc<TagSet>,
}

impl SeriesKey {
    pub fn new(name: impl Into<Arc<str>>, kind: MetricKind, tags: TagSet) -> Self {
        Self {
            name: name.into(),
            kind,
            tags: Arc::new(tags),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> MetricKind {
        self.kind
    }

    #[must_use]
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub series: SeriesKey,
    pub time: DateTime<Utc>,
    pub value: f64,
}

impl Sample {
    #[must_use]
    pub const fn new(series: SeriesKey, time: DateTime<Utc>, value: f64) -> Self {
        Self {
            series,
            time,
            value,
        }
    }
}

/// A group of samples pushed to the buffer together, usually from one
/// iteration of the load generator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleContainer {
    samples: Vec<Sample>,
}

impl SampleContainer {
    #[must_use]
    pub const fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl From<Sample> for SampleContainer {
    fn from(sample: Sample) -> Self {
        Self {
            samples: vec![sample],
        }
    }
}

impl From<Vec<Sample>> for SampleContainer {
    fn from(samples: Vec<Sample>) -> Self {
        Self { samples }
    }
}

impl FromIterator<Sample> for SampleContainer {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}
