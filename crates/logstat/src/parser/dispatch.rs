use super::detector::detect_format;
use super::formats::{CombinedParser, SimpleParser};
use super::traits::*;
use super::MAX_LINE_SIZE;

/// Routes each line to the parser for its detected format.
///
/// Lines detected as JSON or unknown get one attempt with the simple
/// parser before being rejected.
pub struct LineDispatcher {
    simple: SimpleParser,
    combined: CombinedParser,
}

impl LineDispatcher {
    pub fn new() -> Self {
        Self {
            simple: SimpleParser,
            combined: CombinedParser,
        }
    }

    /// Parse one raw line as read from a file (without the trailing `\n`).
    pub fn parse_bytes(&self, raw: &[u8]) -> Result<RequestRecord, ParseError> {
        if raw.len() > MAX_LINE_SIZE {
            return Err(ParseError::LineTooLarge(raw.len(), MAX_LINE_SIZE));
        }

        let line = std::str::from_utf8(raw).map_err(|_| ParseError::NonUtf8)?;
        self.parse_line(line.strip_suffix('\r').unwrap_or(line))
    }

    pub fn parse_line(&self, line: &str) -> Result<RequestRecord, ParseError> {
        match detect_format(line) {
            LogFormat::Simple => self.simple.parse(line),
            LogFormat::Combined => self.combined.parse(line),
            format => self.simple.parse(line).map_err(|_| ParseError::Unsupported(format)),
        }
    }
}

impl Default for LineDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
