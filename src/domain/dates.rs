use chrono::{DateTime, NaiveDateTime, Utc};

use super::error::{ExportError, ExportResult};

/// Timestamp layout used by the forge for `created_at`/`updated_at`.
pub const FORGE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const SECONDS_PER_DAY: i64 = 86_400;

pub fn parse_timestamp(value: &str) -> ExportResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, FORGE_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|source| ExportError::Format {
            value: value.to_string(),
            source,
        })
}

/// Whole days from `earlier` to `later`, rounded toward negative infinity.
///
/// Negative when `later` precedes `earlier`; callers clamp if they need to.
pub fn days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    (later - earlier).num_seconds().div_euclid(SECONDS_PER_DAY)
}
