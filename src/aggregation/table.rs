use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::metrics::{Sample, SeriesKey, truncate_to_millis, unix_millis};
use crate::sinks::{Sink, SinkFactory};

/// How a sample related to the state of its series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// First sample ever seen for the series.
    Created,
    /// Truncated time moved past the latest one.
    Advanced,
    /// Same truncated millisecond as the latest sample.
    SameMillisecond,
    /// Truncated time earlier than the latest one. The value is still merged.
    OutOfOrder,
}

impl Observation {
    #[must_use]
    pub const fn marks_series(self) -> bool {
        match self {
            Observation::Created | Observation::Advanced => true,
            Observation::SameMillisecond | Observation::OutOfOrder => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SeriesState {
    sink: Sink,
    latest: DateTime<Utc>,
}

impl SeriesState {
    #[must_use]
    pub const fn sink(&self) -> &Sink {
        &self.sink
    }

    /// Latest truncated timestamp seen for the series.
    #[must_use]
    pub const fn latest(&self) -> DateTime<Utc> {
        self.latest
    }

    #[must_use]
    pub fn latest_millis(&self) -> i64 {
        unix_millis(self.latest)
    }
}

/// Every series seen since the output started. Entries are never removed.
#[derive(Debug)]
pub struct SeriesTable {
    series: HashMap<SeriesKey, SeriesState>,
    factory: SinkFactory,
}

impl SeriesTable {
    #[must_use]
    pub fn new(factory: SinkFactory) -> Self {
        Self {
            series: HashMap::new(),
            factory,
        }
    }

    #[must_use]
    pub fn get(&self, key: &SeriesKey) -> Option<&SeriesState> {
        self.series.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Merges one sample into its series, creating the series on first use.
    pub fn observe(&mut self, sample: &Sample) -> Observation {
        let truncated = truncate_to_millis(sample.time);

        if let Some(state) = self.series.get_mut(&sample.series) {
            let observation = match truncated.cmp(&state.latest) {
                std::cmp::Ordering::Greater => {
                    state.latest = truncated;
                    Observation::Advanced
                }
                std::cmp::Ordering::Equal => Observation::SameMillisecond,
                std::cmp::Ordering::Less => Observation::OutOfOrder,
            };
            state.sink.add(sample.value);
            return observation;
        }

        let mut sink = self.factory.build(sample.series.kind());
        sink.add(sample.value);
        self.series.insert(
            sample.series.clone(),
            SeriesState {
                sink,
                latest: truncated,
            },
        );
        Observation::Created
    }
}
