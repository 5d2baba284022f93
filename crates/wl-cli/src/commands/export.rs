//! Implementation of the `wl export` command.
//!
//! Reads the commute log and writes the pay report as a BOM-prefixed CSV
//! file that opens cleanly in spreadsheet tools.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::Config;

/// Run the export command.
pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let input = input.unwrap_or(&config.log_path);
    let output = output.unwrap_or(&config.report_path);

    let wage = config.wage().context("invalid hourly_rate in configuration")?;
    let ledger = wl_core::export_csv(input, output, &wage)
        .with_context(|| format!("failed to export {}", input.display()))?;

    writeln!(writer, "Exported to {}", output.display())?;
    writeln!(
        writer,
        "{} work session(s) converted.",
        ledger.report.sessions.len()
    )?;
    if !ledger.notices.is_empty() {
        writeln!(
            writer,
            "{} log anomaly(ies) skipped; run with -v or see `wl report` for details.",
            ledger.notices.len()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_for(dir: &TempDir) -> Config {
        Config {
            log_path: dir.path().join("commute.txt"),
            report_path: dir.path().join("out").join("commute_report.csv"),
            hourly_rate: 10_030.0,
            device_id: None,
        }
    }

    #[test]
    fn export_writes_configured_report_path() {
        let temp = TempDir::new().unwrap();
        let config = config_for(&temp);
        std::fs::write(
            &config.log_path,
            "2025-03-20 23:00:00 출근\n2025-03-21 01:00:00 퇴근\n2025-03-21 01:00:05 퇴근\n",
        )
        .unwrap();

        let mut output = Vec::new();
        run(&mut output, &config, None, None).unwrap();

        let csv = std::fs::read_to_string(&config.report_path).unwrap();
        assert!(csv.ends_with("2025-03-20,2025-03-20 23:00:00,2025-03-21 01:00:00,2.00,20060\r\n"));

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("1 work session(s) converted."));
        assert!(output.contains("1 log anomaly(ies) skipped"));
    }

    #[test]
    fn export_negative_rate_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            hourly_rate: -10_030.0,
            ..config_for(&temp)
        };
        std::fs::write(
            &config.log_path,
            "2025-03-20 09:00:00 출근\n2025-03-20 17:00:00 퇴근\n",
        )
        .unwrap();

        let mut output = Vec::new();
        let err = run(&mut output, &config, None, None).unwrap_err();

        assert!(format!("{err:#}").contains("invalid hourly_rate"));
        assert!(!config.report_path.exists());
    }

    #[test]
    fn export_missing_log_leaves_no_file() {
        let temp = TempDir::new().unwrap();
        let config = config_for(&temp);

        let mut output = Vec::new();
        let err = run(&mut output, &config, None, None).unwrap_err();

        assert!(format!("{err:#}").contains("commute log not found"));
        assert!(!config.report_path.exists());
        assert!(!config.report_path.parent().unwrap().exists());
    }
}
