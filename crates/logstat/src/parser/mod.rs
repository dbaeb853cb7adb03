/// Access-log line detection and parsing
///
/// This module classifies raw lines into a small closed set of formats
/// and converts them into normalized `RequestRecord`s.
///
/// # Architecture
///
/// - `traits.rs`: Core parser trait
/// - `detector.rs`: Per-line format detection
/// - `formats/`: Individual format parser implementations
/// - `dispatch.rs`: Detection + parser selection with simple-format fallback
///
/// # Failure Semantics
///
/// Parsers never panic on malformed input. A rejected line is a
/// `ParseError` value; numeric sub-fields that fail to parse become zero
/// instead of rejecting the line.

pub mod traits;
pub mod detector;
pub mod dispatch;
pub mod formats;
pub mod model;

// Re-export commonly used types
pub use traits::LineParser;
pub use model::{LogFormat, ParseError, RequestRecord, strip_query};
pub use detector::detect_format;
pub use dispatch::LineDispatcher;

// Constants
pub const MAX_LINE_SIZE: usize = 1_048_576; // 1MB
