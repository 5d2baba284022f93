//! CLI subcommand implementations.

pub mod battery;
pub mod export;
pub mod report;
