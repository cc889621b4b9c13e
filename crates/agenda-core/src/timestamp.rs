//! ISO-8601 timestamp canonicalization.
//!
//! Every temporal field of the clean dataset is rendered as
//! `YYYY-MM-DDTHH:MM:SS+00:00`. Inputs carrying an explicit offset are
//! converted to UTC first, so the `+00:00` suffix always tells the truth.
//! Naive date-times and bare dates are taken as UTC.
//!
//! Extended (`2025-06-01T10:00:00`) and basic (`20250601T100000`) forms are
//! both accepted, as is reduced precision down to the hour
//! (`2025-06-01T10`).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::borrow::Cow;

/// Output pattern for canonical timestamps.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S+00:00";

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y%m%dT%H%M%S%.f%:z",
    "%Y%m%dT%H%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

/// Parse an ISO-8601 timestamp, accepting a trailing `Z` as `+00:00`.
pub fn parse_iso8601(raw: &str) -> Option<DateTime<Utc>> {
    let input: Cow<'_, str> = match raw.strip_suffix(['Z', 'z']) {
        Some(head) => Cow::Owned(format!("{head}+00:00")),
        None => Cow::Borrowed(raw),
    };
    parse_with_formats(&input)
        .or_else(|| pad_hour_only(&input).and_then(|padded| parse_with_formats(&padded)))
}

fn parse_with_formats(input: &str) -> Option<DateTime<Utc>> {
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(naive.and_utc());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `YYYY-MM-DDTHH[offset]` with the minutes spelled out, since chrono will
/// not build a time from an hour alone.
fn pad_hour_only(input: &str) -> Option<String> {
    input.get(10..11).filter(|sep| *sep == "T" || *sep == " ")?;
    let (date, time) = input.split_at(11);
    let hour = time.get(..2)?;
    let rest = &time[2..];
    if !hour.bytes().all(|b| b.is_ascii_digit())
        || rest.starts_with(|c: char| c.is_ascii_digit() || c == ':')
    {
        return None;
    }
    Some(format!("{date}{hour}:00{rest}"))
}

/// Canonicalize a temporal field. Missing, empty and unparsable inputs all
/// come back as `None`.
pub fn canonicalize(raw: Option<&str>) -> Option<String> {
    let raw = raw.filter(|s| !s.is_empty())?;
    parse_iso8601(raw).map(|dt| dt.format(CANONICAL_FORMAT).to_string())
}
