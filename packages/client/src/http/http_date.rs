//! HTTP date formatting and parsing (RFC 7231 section 7.1.1.1)

use std::time::{Duration, SystemTime};

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};

const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format a timestamp as an IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
///
/// `None` when the year does not fit the four digits an HTTP-date allows.
#[must_use]
pub fn format_http_date(time: SystemTime) -> Option<String> {
    let secs = match time.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_secs()).ok()?,
        Err(before) => {
            let before = before.duration();
            let whole = i64::try_from(before.as_secs()).ok()?;
            -whole - i64::from(before.subsec_nanos() > 0)
        }
    };

    DateTime::<Utc>::from_timestamp(secs, 0)
        .filter(|dt| (0..=9999).contains(&dt.year()))
        .map(|dt| dt.format(IMF_FIXDATE).to_string())
}

/// Parse any of the three HTTP-date forms into a `SystemTime`.
///
/// Dates before the Unix epoch are rejected.
#[must_use]
pub fn parse_http_date(value: &str) -> Option<SystemTime> {
    let value = value.trim();

    let timestamp = NaiveDateTime::parse_from_str(value, IMF_FIXDATE)
        // RFC 850 format with 2-digit year
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%A, %d-%b-%y %H:%M:%S GMT"))
        // ANSI C asctime() format
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%a %b %e %H:%M:%S %Y"))
        .map(|dt| dt.and_utc().timestamp())
        .or_else(|_| DateTime::parse_from_rfc2822(value).map(|dt| dt.timestamp()))
        .ok()?;

    u64::try_from(timestamp)
        .ok()
        .map(|secs| SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
}
