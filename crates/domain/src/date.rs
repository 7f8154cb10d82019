use chrono::prelude::*;
use chrono_tz::Tz;

/// Wire and storage format of reminder times. The value is a civil
/// (wall-clock) time in the configured reminder timezone, no offset.
pub const CIVIL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn parse_civil_datetime(datetime: &str) -> anyhow::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(datetime.trim(), CIVIL_DATETIME_FORMAT).map_err(|e| {
        anyhow::Error::msg(format!(
            "Expected a datetime formatted as YYYY-MM-DD HH:MM:SS, got: `{}` ({})",
            datetime, e
        ))
    })
}

pub fn format_civil_datetime(datetime: &NaiveDateTime) -> String {
    datetime.format(CIVIL_DATETIME_FORMAT).to_string()
}

/// Resolves a civil datetime in `tz` to an absolute timestamp in millis.
///
/// Local times that do not exist in `tz` (skipped by a DST transition)
/// give `None`. Ambiguous local times resolve to the earliest instant.
pub fn civil_to_timestamp_millis(datetime: &NaiveDateTime, tz: &Tz) -> Option<i64> {
    tz.from_local_datetime(datetime)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}

pub fn timestamp_millis_to_civil(timestamp_millis: i64, tz: &Tz) -> Option<NaiveDateTime> {
    Utc.timestamp_millis_opt(timestamp_millis)
        .single()
        .map(|dt| dt.with_timezone(tz).naive_local())
}
