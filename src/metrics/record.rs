use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::MetricsError;

use super::types::{MetricKind, Sample, SeriesKey, TagSet};

/// One sample as written by the engine's JSON lines output.
#[derive(Debug, Clone, Deserialize)]
pub struct SampleRecord {
    pub metric: String,
    #[serde(rename = "type")]
    pub kind: MetricKind,
    #[serde(default)]
    pub tags: TagSet,
    /// RFC 3339 timestamp; the read time is used when absent.
    pub time: Option<String>,
    pub value: f64,
}

impl SampleRecord {
    fn into_sample(self, line: usize, now: DateTime<Utc>) -> Result<Sample, MetricsError> {
        let time = match self.time.as_deref() {
            Some(raw) => DateTime::parse_from_rfc3339(raw)
                .map_err(|_parse_err| MetricsError::InvalidTimestamp { line })?
                .with_timezone(&Utc),
            None => now,
        };
        Ok(Sample::new(
            SeriesKey::new(self.metric, self.kind, self.tags),
            time,
            self.value,
        ))
    }
}

/// Parses one JSON line into a sample. Blank lines yield `None`.
///
/// # Errors
///
/// Returns an error when the line is not a valid sample record or its
/// timestamp is not RFC 3339.
pub fn parse_sample_line(
    line: &str,
    line_number: usize,
    now: DateTime<Utc>,
) -> Result<Option<Sample>, MetricsError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let record: SampleRecord =
        serde_json::from_str(trimmed).map_err(|err| MetricsError::ParseRecord {
            line: line_number,
            source: err,
        })?;
    record.into_sample(line_number, now).map(Some)
}
