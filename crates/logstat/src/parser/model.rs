use thiserror::Error;
use chrono::{DateTime, FixedOffset};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `YYYY-MM-DD HH:MM:SS METHOD PATH STATUS 120ms "agent"`
    Simple,
    /// Apache/Nginx combined-style access logs
    Combined,
    /// Looks like a JSON object; detected but not parsed
    Json,
    /// Unknown/undetected format
    Unknown,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Simple => "simple",
            LogFormat::Combined => "combined",
            LogFormat::Json => "json",
            LogFormat::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Line too large: {0} bytes (max: {1} bytes)")]
    LineTooLarge(usize, usize),

    #[error("Non-UTF8 content")]
    NonUtf8,

    #[error("Malformed simple format: {0} fields (need at least 7)")]
    MalformedSimple(usize),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Malformed request line")]
    MalformedRequest,

    #[error("Malformed trailer: expected status and bytes")]
    MalformedTrailer,

    #[error("Unsupported format: {0}")]
    Unsupported(LogFormat),
}

/// One access-log request, normalized across formats.
///
/// Optional text fields use the empty string for "absent".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    pub timestamp: DateTime<FixedOffset>,
    pub client_ip: String,
    pub user: String,
    pub method: String,
    pub path: String,
    pub status: u32,
    pub bytes_sent: u64,
    pub response_ms: u64,
    pub user_agent: String,
}

impl RequestRecord {
    /// Record with only the mandatory request fields set.
    pub fn new(timestamp: DateTime<FixedOffset>, method: &str, path: &str) -> Self {
        Self {
            timestamp,
            client_ip: String::new(),
            user: String::new(),
            method: method.to_string(),
            path: path.to_string(),
            status: 0,
            bytes_sent: 0,
            response_ms: 0,
            user_agent: String::new(),
        }
    }
}

/// Returns `path` without its query string.
pub fn strip_query(path: &str) -> &str {
    match path.split_once('?') {
        Some((head, _)) => head,
        None => path,
    }
}
