use std::collections::HashSet;

use crate::metrics::{SampleContainer, SeriesKey};

use super::table::{Observation, SeriesTable};

/// Result of one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationReport {
    /// Series to emit this cycle, in the order they were first marked.
    pub advanced: Vec<SeriesKey>,
    pub samples: usize,
    pub out_of_order: usize,
}

/// Folds a drained batch into the table, in arrival order.
///
/// A series is reported once per pass, and only if it was created or its
/// truncated timestamp moved forward. Samples that land on the same or an
/// earlier millisecond still update the sink.
pub fn aggregate(table: &mut SeriesTable, containers: &[SampleContainer]) -> AggregationReport {
    let mut report = AggregationReport::default();
    let mut marked: HashSet<SeriesKey> = HashSet::new();

    for container in containers {
        for sample in container.samples() {
            report.samples = report.samples.saturating_add(1);
            let observation = table.observe(sample);
            if observation == Observation::OutOfOrder {
                report.out_of_order = report.out_of_order.saturating_add(1);
                tracing::trace!(
                    metric = sample.series.name(),
                    "Sample older than the latest one for its series"
                );
            }
            if observation.marks_series() && marked.insert(sample.series.clone()) {
                report.advanced.push(sample.series.clone());
            }
        }
    }

    report
}
