use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike};

use crate::parser::traits::{LineParser, ParseError, RequestRecord};

use super::matches_layout;

pub const COMBINED_TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";
pub const COMBINED_TIMESTAMP_FORMAT_NO_ZONE: &str = "%d/%b/%Y:%H:%M:%S";
const ZONED_LAYOUT: &str = "99/AAA/9999:99:99:99 s9999";
const NO_ZONE_LAYOUT: &str = "99/AAA/9999:99:99:99";

/// Parser for Apache/Nginx style access logs.
///
/// Format: `host user [date] "METHOD /path PROTO" status bytes`
/// Example: `127.0.0.1 - frank [10/Oct/2000:13:55:36 -0700] "GET /apache_pb.gif HTTP/1.0" 200 2326`
///
/// Extraction is positional. Only the delimiters are validated; numeric
/// fields that fail to parse are recorded as zero.
pub struct CombinedParser;

impl LineParser for CombinedParser {
    fn parse(&self, line: &str) -> Result<RequestRecord, ParseError> {
        let (client_ip, rest) = line.split_once(' ')
            .ok_or_else(|| ParseError::InvalidFormat("Missing client address".into()))?;

        // user is kept verbatim, including "-"
        let (user, rest) = rest.split_once(' ')
            .ok_or_else(|| ParseError::InvalidFormat("Missing user field".into()))?;

        let open_bracket = rest.find('[')
            .ok_or_else(|| ParseError::InvalidFormat("Missing timestamp bracket".into()))?;
        let close_bracket = rest[open_bracket..].find(']')
            .map(|i| open_bracket + i)
            .ok_or_else(|| ParseError::InvalidFormat("Unterminated timestamp bracket".into()))?;

        let timestamp = parse_combined_timestamp(&rest[open_bracket + 1..close_bracket])?;

        // Extract the quoted request line: "METHOD /path HTTP/x.x"
        let after_bracket = &rest[close_bracket + 1..];
        let quote_start = after_bracket.find('"')
            .ok_or_else(|| ParseError::InvalidFormat("Missing request quote".into()))?;
        let request_str = &after_bracket[quote_start + 1..];
        let quote_end = request_str.find('"')
            .ok_or_else(|| ParseError::InvalidFormat("Unterminated request quote".into()))?;

        let mut request_parts = request_str[..quote_end].split_whitespace();
        let (method, path) = match (request_parts.next(), request_parts.next()) {
            (Some(method), Some(path)) => (method, path),
            _ => return Err(ParseError::MalformedRequest),
        };

        let mut trailer = request_str[quote_end + 1..].split_whitespace();
        let (status, bytes_sent) = match (trailer.next(), trailer.next()) {
            (Some(status), Some(bytes_sent)) => (status, bytes_sent),
            _ => return Err(ParseError::MalformedTrailer),
        };

        let mut record = RequestRecord::new(timestamp, method, path);
        record.client_ip = client_ip.to_string();
        record.user = user.to_string();
        record.status = status.parse().unwrap_or(0);
        record.bytes_sent = bytes_sent.parse().unwrap_or(0);

        Ok(record)
    }
}

/// Parse `10/Oct/2000:13:55:36 -0700`, or the zone-less form which is
/// taken as UTC. Every numeric field must be zero-padded.
pub fn parse_combined_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    let invalid = |reason: &dyn std::fmt::Display| {
        ParseError::InvalidTimestamp(format!("{}: {}", raw, reason))
    };

    let parsed = if matches_layout(raw, ZONED_LAYOUT) {
        DateTime::parse_from_str(raw, COMBINED_TIMESTAMP_FORMAT).map_err(|e| invalid(&e))?
    } else if matches_layout(raw, NO_ZONE_LAYOUT) {
        NaiveDateTime::parse_from_str(raw, COMBINED_TIMESTAMP_FORMAT_NO_ZONE)
            .map(|naive| naive.and_utc().fixed_offset())
            .map_err(|e| invalid(&e))?
    } else {
        return Err(invalid(&"expected DD/Mon/YYYY:HH:MM:SS [+-]HHMM"));
    };

    if parsed.nanosecond() >= 1_000_000_000 {
        return Err(invalid(&"leap second"));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_common_log_format() {
        let parser = CombinedParser;
        let sample = "10.0.0.1 - - [15/Jan/2024:10:30:45 -0300] \"GET /home HTTP/1.1\" 200 2326";
        let record = parser.parse(sample).unwrap();

        assert_eq!(record.client_ip, "10.0.0.1");
        assert_eq!(record.user, "-");
        assert_eq!(record.method, "GET");
        assert_eq!(record.path, "/home");
        assert_eq!(record.status, 200);
        assert_eq!(record.bytes_sent, 2326);
        assert_eq!(record.response_ms, 0);
        assert_eq!(record.user_agent, "");
        assert_eq!(record.timestamp.to_rfc3339(), "2024-01-15T10:30:45-03:00");
    }

    #[test]
    fn test_parse_named_user() {
        let parser = CombinedParser;
        let sample = "127.0.0.1 - frank [10/Oct/2000:13:55:36 -0700] \"GET /apache_pb.gif HTTP/1.0\" 200 2326";
        let record = parser.parse(sample).unwrap();
        // second space-delimited token, not the authuser column
        assert_eq!(record.user, "-");
    }

    #[test]
    fn test_parse_combined_with_referrer_and_agent() {
        let parser = CombinedParser;
        let sample = "127.0.0.1 - - [29/Jan/2026:10:59:12 +0000] \"POST /api/v1/data HTTP/1.1\" 201 1024 \"https://example.com\" \"curl/7.68.0\"";
        let record = parser.parse(sample).unwrap();
        assert_eq!(record.method, "POST");
        assert_eq!(record.path, "/api/v1/data");
        assert_eq!(record.status, 201);
        assert_eq!(record.bytes_sent, 1024);
    }

    #[test]
    fn test_timestamp_without_offset() {
        let parser = CombinedParser;
        let sample = "10.0.0.1 - - [15/Jan/2024:10:30:45] \"GET /home HTTP/1.1\" 200 12";
        let record = parser.parse(sample).unwrap();
        assert_eq!(record.timestamp.to_rfc3339(), "2024-01-15T10:30:45+00:00");
    }

    #[test]
    fn test_invalid_timestamp() {
        let parser = CombinedParser;
        let sample = "10.0.0.1 - - [yesterday] \"GET /home HTTP/1.1\" 200 12";
        assert!(matches!(parser.parse(sample), Err(ParseError::InvalidTimestamp(_))));
    }

    #[test]
    fn test_timestamp_layout_is_strict() {
        let cases = [
            "5/Jan/2024:1:2:3 +0000",
            "05/Jan/2024:10:30:45 +000",
            "05/Jan/2024:10:30:45 0000",
            "05/January/2024:10:30:45 +0000",
            "05/Jan/+2024:10:30:45",
            "05/Jan/2024:10:30:60 +0000",
            "05/Jan/2024:10:30:60",
            "05/Jan/2024 10:30:45 +0000",
        ];
        for raw in cases {
            assert!(
                matches!(parse_combined_timestamp(raw), Err(ParseError::InvalidTimestamp(_))),
                "accepted {:?}",
                raw
            );
        }

        let parser = CombinedParser;
        let sample = "10.0.0.1 - - [5/Jan/2024:1:2:3 +0000] \"GET /home HTTP/1.1\" 200 12";
        assert!(matches!(parser.parse(sample), Err(ParseError::InvalidTimestamp(_))));
    }

    #[test]
    fn test_dash_bytes_default_to_zero() {
        let parser = CombinedParser;
        let sample = "10.0.0.1 - - [01/Feb/2026:12:00:00 +0000] \"GET /missing HTTP/1.1\" 404 -";
        let record = parser.parse(sample).unwrap();
        assert_eq!(record.status, 404);
        assert_eq!(record.bytes_sent, 0);
    }

    #[test]
    fn test_non_numeric_status_defaults_to_zero() {
        let parser = CombinedParser;
        let sample = "10.0.0.1 - - [01/Feb/2026:12:00:00 +0000] \"GET / HTTP/1.1\" abc 10";
        let record = parser.parse(sample).unwrap();
        assert_eq!(record.status, 0);
        assert_eq!(record.bytes_sent, 10);
    }

    #[test]
    fn test_missing_delimiters() {
        let parser = CombinedParser;
        let cases = [
            "nospaces",
            "10.0.0.1 -",
            "10.0.0.1 - - 15/Jan/2024:10:30:45 \"GET / HTTP/1.1\" 200 1",
            "10.0.0.1 - - [15/Jan/2024:10:30:45 \"GET / HTTP/1.1\" 200 1",
            "10.0.0.1 - - [15/Jan/2024:10:30:45] GET / HTTP/1.1 200 1",
            "10.0.0.1 - - [15/Jan/2024:10:30:45] \"GET / HTTP/1.1 200 1",
        ];
        for sample in cases {
            assert!(
                matches!(parser.parse(sample), Err(ParseError::InvalidFormat(_))),
                "expected InvalidFormat for {:?}",
                sample
            );
        }
    }

    #[test]
    fn test_malformed_request() {
        let parser = CombinedParser;
        let sample = "10.0.0.1 - - [15/Jan/2024:10:30:45] \"GET\" 200 1";
        assert_eq!(parser.parse(sample), Err(ParseError::MalformedRequest));
    }

    #[test]
    fn test_malformed_trailer() {
        let parser = CombinedParser;
        let sample = "10.0.0.1 - - [15/Jan/2024:10:30:45] \"GET / HTTP/1.1\" 200";
        assert_eq!(parser.parse(sample), Err(ParseError::MalformedTrailer));
    }

    struct Entry {
        ip: &'static str,
        user: &'static str,
        timestamp: DateTime<FixedOffset>,
        method: &'static str,
        path: &'static str,
        status: u32,
        bytes: u64,
    }

    fn render(entry: &Entry, with_zone: bool) -> String {
        let format = if with_zone {
            COMBINED_TIMESTAMP_FORMAT
        } else {
            COMBINED_TIMESTAMP_FORMAT_NO_ZONE
        };
        format!(
            "{} {} - [{}] \"{} {} HTTP/1.1\" {} {}",
            entry.ip,
            entry.user,
            entry.timestamp.format(format),
            entry.method,
            entry.path,
            entry.status,
            entry.bytes,
        )
    }

    #[test]
    fn test_round_trip() {
        let minus_three = FixedOffset::west_opt(3 * 3600).unwrap();
        let plus_five_thirty = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();

        let entries = [
            Entry {
                ip: "10.0.0.1",
                user: "-",
                timestamp: minus_three.with_ymd_and_hms(2024, 1, 15, 10, 30, 45).unwrap(),
                method: "GET",
                path: "/home",
                status: 200,
                bytes: 2326,
            },
            Entry {
                ip: "2001:db8::1",
                user: "frank",
                timestamp: plus_five_thirty.with_ymd_and_hms(1999, 12, 31, 23, 59, 59).unwrap(),
                method: "DELETE",
                path: "/api/items/7?force=true",
                status: 503,
                bytes: 0,
            },
            Entry {
                ip: "192.168.1.20",
                user: "-",
                timestamp: utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
                method: "PATCH",
                path: "/",
                status: 404,
                bytes: u64::MAX,
            },
        ];

        let parser = CombinedParser;
        for entry in &entries {
            let record = parser.parse(&render(entry, true)).unwrap();
            assert_eq!(record.client_ip, entry.ip);
            assert_eq!(record.user, entry.user);
            assert_eq!(record.timestamp, entry.timestamp);
            assert_eq!(record.timestamp.offset(), entry.timestamp.offset());
            assert_eq!(record.method, entry.method);
            assert_eq!(record.path, entry.path);
            assert_eq!(record.status, entry.status);
            assert_eq!(record.bytes_sent, entry.bytes);
        }

        // zone-less form only round trips for UTC timestamps
        let record = parser.parse(&render(&entries[2], false)).unwrap();
        assert_eq!(record.timestamp, entries[2].timestamp);
        assert_eq!(record.timestamp.offset(), entries[2].timestamp.offset());
    }
}
