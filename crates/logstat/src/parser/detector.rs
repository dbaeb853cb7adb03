use super::traits::LogFormat;
use super::formats::simple::parse_simple_timestamp;

/// Classify a raw line into one of the known formats.
///
/// Rules are checked in order and the first match wins:
/// 1. `HTTP/` together with `[` is a combined access log
/// 2. six or more fields starting with a zero-padded `YYYY-MM-DD HH:MM:SS`
///    is the simple format
/// 3. a `{` ... `}` pair is flagged as JSON
///
/// Anything else is `Unknown`. Never fails.
pub fn detect_format(line: &str) -> LogFormat {
    if line.contains("HTTP/") && line.contains('[') {
        return LogFormat::Combined;
    }

    let mut fields = line.split_whitespace();
    if let (Some(date), Some(time)) = (fields.next(), fields.next()) {
        // four more fields are needed to reach six
        if fields.take(4).count() == 4 && parse_simple_timestamp(date, time).is_some() {
            return LogFormat::Simple;
        }
    }

    if line.contains('{') && line.contains('}') {
        return LogFormat::Json;
    }

    LogFormat::Unknown
}
