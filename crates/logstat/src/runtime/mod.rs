//! Runtime module — process lifecycle: logging, config, run.

pub mod boot;
