//! Core domain logic for the commute worklog.
//!
//! This crate contains the fundamental types and logic for:
//! - Reading: parsing clock-in / clock-out lines from the commute log
//! - Pairing: matching clock-ins with clock-outs into paid sessions
//! - Reporting: totals, CSV export, console and JSON rendering

pub mod event;
mod export;
pub mod pairing;
pub mod pipeline;
pub mod reader;
pub mod report;

pub use event::{Event, EventKind, UnknownLabel};
pub use export::{ExportError, write_csv_atomic};
pub use pairing::{InvalidRate, Notice, Pairing, Session, WageConfig, pair_sessions};
pub use pipeline::{Ledger, export_csv, load};
pub use reader::{LogError, parse_line, parse_lines, read_log, sort_events};
pub use report::{JsonReport, Report, write_csv, write_listing};
