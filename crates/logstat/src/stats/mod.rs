//! Stats module — per-file accumulation and cross-file merging.

pub mod model;
pub mod accumulate;
pub mod merge;

pub use model::Stats;
pub use accumulate::Accumulator;
pub use merge::StatsMerger;
