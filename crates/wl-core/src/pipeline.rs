//! End-to-end runs: read the log, pair shifts, build the report.

use std::path::Path;

use crate::export::{ExportError, write_csv_atomic};
use crate::pairing::{Notice, WageConfig, pair_sessions};
use crate::reader::{LogError, read_log, sort_events};
use crate::report::Report;

/// Everything one run derives from the commute log.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    pub report: Report,
    pub notices: Vec<Notice>,
}

/// Reads and pairs the commute log at `input`.
///
/// Only a missing or unopenable file fails; every content anomaly ends up in
/// [`Ledger::notices`] or is skipped.
pub fn load(input: &Path, config: &WageConfig) -> Result<Ledger, LogError> {
    let mut events = read_log(input)?;
    sort_events(&mut events);

    let pairing = pair_sessions(&events, config);
    for notice in &pairing.notices {
        tracing::warn!(%notice, "commute log anomaly");
    }

    Ok(Ledger {
        report: Report::new(pairing.sessions, config),
        notices: pairing.notices,
    })
}

/// Loads `input` and writes its CSV report to `output`.
///
/// Nothing is written when the input cannot be read.
pub fn export_csv(input: &Path, output: &Path, config: &WageConfig) -> Result<Ledger, ExportError> {
    let ledger = load(input, config)?;
    write_csv_atomic(&ledger.report, output)?;
    tracing::info!(
        path = %output.display(),
        sessions = ledger.report.sessions.len(),
        "wrote commute report"
    );
    Ok(ledger)
}
