//! Sample data model: metric kinds, series identity, and timestamp handling.
mod record;
mod time;
mod types;


pub use record::{SampleRecord, parse_sample_line};
pub use time::{truncate_to_millis, unix_millis};
pub use types::{MetricKind, Sample, SampleContainer, SeriesKey, TagSet};
