//! Command implementations

pub mod generation_report;

pub use generation_report::{GenerationStatistics, run_generation_report};
