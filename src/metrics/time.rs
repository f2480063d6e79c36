use chrono::{DateTime, Utc};

/// Floors a timestamp to the millisecond, the precision remote write stores
/// keep.
#[must_use]
pub fn truncate_to_millis(time: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(time.timestamp_millis()).unwrap_or(time)
}

#[must_use]
pub fn unix_millis(time: DateTime<Utc>) -> i64 {
    time.timestamp_millis()
}
