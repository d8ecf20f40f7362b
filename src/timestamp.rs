//! Timestamp normalization between export formats and [`DateTime<Utc>`].
//!
//! WhatsApp text exports carry wall-clock fields (`5/3/24, 09:15:00`) with no
//! timezone. Those fields are taken as the literal UTC instant and written
//! back the same way, so WhatsApp → canonical → WhatsApp reproduces the input
//! fields exactly. Telegram exports carry an ISO-8601 string and/or a Unix
//! seconds string.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, Utc};

use crate::error::{ChatbridgeError, Result};

/// Human-readable shape of WhatsApp timestamps, used in error messages.
pub const LOCAL_FORMAT: &str = "D/M/Y, H:M:S";

/// Human-readable shape of Telegram `date` values, used in error messages.
pub const INSTANT_FORMAT: &str = "YYYY-MM-DDTHH:MM:SS[Z|+HH:MM] or Unix seconds";

/// Parses a WhatsApp `D/M/Y` date and `H:M:S` time into an instant.
///
/// Two-digit years are expanded with a `20` prefix. Fails with
/// [`ChatbridgeError::InvalidTimestamp`] when the fields do not name a real
/// calendar date and time.
///
/// # Example
///
/// ```rust
/// use chatbridge::timestamp::parse_local_timestamp;
///
/// let ts = parse_local_timestamp("5/3/24", "09:15:00")?;
/// assert_eq!(ts.to_rfc3339(), "2024-03-05T09:15:00+00:00");
///
/// assert!(parse_local_timestamp("30/2/24", "09:15:00").is_err());
/// # Ok::<(), chatbridge::ChatbridgeError>(())
/// ```
pub fn parse_local_timestamp(date: &str, time: &str) -> Result<DateTime<Utc>> {
    let invalid = || ChatbridgeError::invalid_timestamp(format!("{date}, {time}"), LOCAL_FORMAT);

    let [day, month, year] = split_fields(date, '/').ok_or_else(invalid)?;
    let [hour, minute, second] = split_fields(time, ':').ok_or_else(invalid)?;

    let number = |field: &str| field.parse::<u32>().map_err(|_| invalid());

    let year = expand_year(year).ok_or_else(invalid)?;
    let date = NaiveDate::from_ymd_opt(year, number(month)?, number(day)?);
    let time = NaiveTime::from_hms_opt(number(hour)?, number(minute)?, number(second)?);

    match (date, time) {
        (Some(date), Some(time)) => Ok(NaiveDateTime::new(date, time).and_utc()),
        _ => Err(invalid()),
    }
}

/// Splits an instant into WhatsApp `(date, time)` fields.
///
/// Day and month are unpadded, the year keeps its last two digits and the
/// time is zero-padded `HH:MM:SS`.
///
/// ```rust
/// use chatbridge::timestamp::to_local_fields;
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2023, 1, 1, 10, 0, 0).unwrap();
/// assert_eq!(to_local_fields(&ts), ("1/1/23".to_string(), "10:00:00".to_string()));
/// ```
pub fn to_local_fields(instant: &DateTime<Utc>) -> (String, String) {
    let date = format!(
        "{}/{}/{}",
        instant.day(),
        instant.month(),
        instant.format("%y")
    );
    let time = instant.format("%H:%M:%S").to_string();
    (date, time)
}

/// Parses a Telegram ISO-8601 `date` value.
///
/// Accepts RFC 3339 strings with an offset (normalized to UTC) and the
/// offset-less `YYYY-MM-DDTHH:MM:SS` Telegram Desktop writes, which is taken
/// literally as UTC. Fractional seconds are truncated.
pub fn parse_instant(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc).trunc_subsecs(0));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| naive.and_utc().trunc_subsecs(0))
        .ok_or_else(|| ChatbridgeError::invalid_timestamp(input, INSTANT_FORMAT))
}

/// Parses a Unix seconds value such as Telegram's `date_unixtime`.
pub fn parse_unix_timestamp(input: &str) -> Result<DateTime<Utc>> {
    input
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(from_unix)
        .ok_or_else(|| ChatbridgeError::invalid_timestamp(input, INSTANT_FORMAT))
}

/// Converts Unix seconds into an instant, if in range.
pub fn from_unix(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}

/// Formats an instant as canonical ISO-8601 with second precision.
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Formats an instant as decimal Unix seconds.
pub fn format_unix(instant: &DateTime<Utc>) -> String {
    instant.timestamp().to_string()
}

fn split_fields(value: &str, separator: char) -> Option<[&str; 3]> {
    let mut parts = value.trim().split(separator);
    let fields = [parts.next()?, parts.next()?, parts.next()?];
    if parts.next().is_some() {
        return None;
    }
    let all_digits = fields
        .iter()
        .all(|f| !f.is_empty() && f.len() <= 4 && f.bytes().all(|b| b.is_ascii_digit()));
    all_digits.then_some(fields)
}

fn expand_year(field: &str) -> Option<i32> {
    match field.len() {
        2 => format!("20{field}").parse().ok(),
        4 => field.parse().ok(),
        _ => None,
    }
}
