//! Report command for printing the pay report.
//!
//! This module implements `wl report` with human-readable and JSON output.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use wl_core::{JsonReport, write_listing};

use crate::Config;

/// Runs the report command.
pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    input: Option<&Path>,
    json: bool,
) -> Result<()> {
    let input = input.unwrap_or(&config.log_path);
    let wage = config.wage().context("invalid hourly_rate in configuration")?;
    let ledger = wl_core::load(input, &wage)
        .with_context(|| format!("failed to load {}", input.display()))?;

    if json {
        let report = JsonReport::new(&ledger.report, &ledger.notices);
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write_listing(&ledger.report, &ledger.notices, &mut *writer)?;
    }

    Ok(())
}
