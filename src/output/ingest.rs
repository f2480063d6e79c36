use chrono::Utc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::MetricsError;
use crate::metrics::parse_sample_line;

use super::buffer::SampleBuffer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub samples: usize,
    /// Lines that could not be parsed; each is logged and skipped.
    pub rejected: usize,
}

/// Feeds JSON-lines samples from `reader` into `buffer` until end of input.
///
/// # Errors
///
/// Returns an error only when reading from `reader` fails; malformed lines
/// are skipped.
pub async fn ingest_json_lines<R>(
    reader: R,
    buffer: &SampleBuffer,
) -> Result<IngestSummary, MetricsError>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = IngestSummary::default();
    let mut lines = reader.lines();
    let mut line_number = 0usize;

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|source| MetricsError::Io {
            context: "reading samples",
            source,
        })?
    {
        line_number = line_number.saturating_add(1);
        match parse_sample_line(&line, line_number, Utc::now()) {
            Ok(Some(sample)) => {
                buffer.add_samples(sample.into());
                summary.samples = summary.samples.saturating_add(1);
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!("Skipping sample: {}", err);
                summary.rejected = summary.rejected.saturating_add(1);
            }
        }
    }

    Ok(summary)
}
