pub use super::model::{LogFormat, ParseError, RequestRecord};

pub trait LineParser: Send + Sync {
    /// parse one decoded log line into a request record
    fn parse(&self, line: &str) -> Result<RequestRecord, ParseError>;
}
