use chrono::{DateTime, NaiveDate, NaiveDateTime};
use time::OffsetDateTime;

pub const COLUMN_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `DateTime64(0, 'UTC')` columns hold the regional wall-clock as if it
/// were UTC, so conversions never shift the value.
pub fn naive_to_column(value: &NaiveDateTime) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(value.and_utc().timestamp())
        .unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

pub fn column_to_naive(value: OffsetDateTime) -> NaiveDateTime {
    DateTime::from_timestamp(value.unix_timestamp(), 0)
        .map(|utc| utc.naive_utc())
        .unwrap_or_default()
}

/// Clamps into the range a `DateTime64` column can represent
/// (1900-01-01 00:00:00 ..= 2299-12-31 23:59:59).
pub fn clamp_to_column_range(value: NaiveDateTime) -> NaiveDateTime {
    let min = NaiveDate::from_ymd_opt(1900, 1, 1).and_then(|date| date.and_hms_opt(0, 0, 0));
    let max = NaiveDate::from_ymd_opt(2299, 12, 31).and_then(|date| date.and_hms_opt(23, 59, 59));
    match (min, max) {
        (Some(min), Some(max)) => value.clamp(min, max),
        _ => value,
    }
}

pub fn format_column_time(value: &NaiveDateTime) -> String {
    value.format(COLUMN_TIME_FORMAT).to_string()
}
