use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike};

use crate::parser::traits::{LineParser, ParseError, RequestRecord};

use super::matches_layout;

pub const SIMPLE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_LAYOUT: &str = "9999-99-99";
const TIME_LAYOUT: &str = "99:99:99";

/// Parse the `date` and `time` fields of a simple-format line.
///
/// Both fields must be zero-padded (`YYYY-MM-DD`, `HH:MM:SS`) and leap
/// seconds are rejected. The format carries no zone, so the result is
/// pinned to UTC.
pub fn parse_simple_timestamp(date: &str, time: &str) -> Option<DateTime<FixedOffset>> {
    if !matches_layout(date, DATE_LAYOUT) || !matches_layout(time, TIME_LAYOUT) {
        return None;
    }

    let joined = format!("{} {}", date, time);
    NaiveDateTime::parse_from_str(&joined, SIMPLE_TIMESTAMP_FORMAT)
        .ok()
        .filter(|naive| naive.nanosecond() < 1_000_000_000)
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Parser for space-delimited application logs.
///
/// Layout: `date time method path status response [user agent...]`
/// Example: `2024-01-15 10:30:45 GET /home 200 120ms "Mozilla/5.0"`
///
/// Fields are split on single spaces, so doubled spaces produce empty fields.
pub struct SimpleParser;

impl LineParser for SimpleParser {
    fn parse(&self, line: &str) -> Result<RequestRecord, ParseError> {
        let parts: Vec<&str> = line.split(' ').collect();
        if parts.len() < 7 {
            return Err(ParseError::MalformedSimple(parts.len()));
        }

        let timestamp = parse_simple_timestamp(parts[0], parts[1])
            .ok_or_else(|| ParseError::InvalidTimestamp(format!("{} {}", parts[0], parts[1])))?;

        let mut record = RequestRecord::new(timestamp, parts[2], parts[3]);
        record.status = parts[4].parse().unwrap_or(0);
        record.response_ms = parse_response_ms(parts[5]);
        record.user_agent = parts[6..].join(" ").trim_matches('"').to_string();

        Ok(record)
    }
}

/// `120ms` -> 120. Anything without the `ms` suffix counts as no timing.
fn parse_response_ms(field: &str) -> u64 {
    field
        .strip_suffix("ms")
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}
