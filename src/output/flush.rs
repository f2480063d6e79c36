use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::aggregation::{SeriesTable, aggregate};
use crate::remote::{SeriesEncoder, WriteTransport};

use super::buffer::SampleBuffer;

/// What a single flush did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Nothing was buffered; the transport was not called.
    Idle,
    /// Samples were merged but no series moved to a newer millisecond.
    Unchanged { samples: usize },
    Sent { samples: usize, series: usize },
    /// The transport failed and the batch was dropped.
    Failed { samples: usize, series: usize },
}

/// Drains the buffer, aggregates into the series table, encodes what
/// advanced and hands it to the transport. Owns the series table for the
/// lifetime of the output.
pub struct FlushPipeline {
    buffer: SampleBuffer,
    table: SeriesTable,
    encoder: SeriesEncoder,
    transport: Arc<dyn WriteTransport>,
    push_interval: Duration,
}

impl FlushPipeline {
    #[must_use]
    pub const fn new(
        buffer: SampleBuffer,
        table: SeriesTable,
        encoder: SeriesEncoder,
        transport: Arc<dyn WriteTransport>,
        push_interval: Duration,
    ) -> Self {
        Self {
            buffer,
            table,
            encoder,
            transport,
            push_interval,
        }
    }

    #[must_use]
    pub const fn table(&self) -> &SeriesTable {
        &self.table
    }

    pub async fn flush(&mut self) -> FlushOutcome {
        let start = Instant::now();
        let containers = self.buffer.drain();
        if containers.is_empty() {
            tracing::debug!("No buffered samples, skipping the flush.");
            return FlushOutcome::Idle;
        }

        let report = aggregate(&mut self.table, &containers);
        if report.out_of_order > 0 {
            tracing::debug!(
                "{} samples arrived older than their series' latest point.",
                report.out_of_order
            );
        }
        let series = self.encoder.encode(&self.table, &report.advanced);
        if series.is_empty() {
            tracing::debug!(
                "{} samples merged without advancing any series, nothing to send.",
                report.samples
            );
            return FlushOutcome::Unchanged {
                samples: report.samples,
            };
        }
        let series_count = series.len();
        tracing::debug!("Converted {} samples into {} time series.", report.samples, series_count);

        let outcome = match self.transport.store(series).await {
            Ok(()) => FlushOutcome::Sent {
                samples: report.samples,
                series: series_count,
            },
            Err(err) => {
                tracing::error!("Failed to send the time series to the endpoint: {}", err);
                FlushOutcome::Failed {
                    samples: report.samples,
                    series: series_count,
                }
            }
        };

        let elapsed = start.elapsed();
        if elapsed > self.push_interval {
            tracing::warn!(
                "Flushing {} time series took {:?} while the push interval is {:?}. Some samples may be dropped.",
                series_count,
                elapsed,
                self.push_interval
            );
        } else {
            tracing::debug!("Flushed {} time series in {:?}.", series_count, elapsed);
        }
        outcome
    }
}
