// Module structure for the logstat access-log analyzer.

// Core engine
pub mod parser;
pub mod stats;
pub mod analyze;

// Process plumbing
pub mod conf;
pub mod runtime;
