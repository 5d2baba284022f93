//! Battery readings via Termux:API.

use std::time::Duration;

use serde::Deserialize;

use crate::{BatteryProbe, BatteryStatus, DeviceError, process};

const PROGRAM: &str = "termux-battery-status";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Reads the battery through the `termux-battery-status` command.
#[derive(Debug, Clone)]
pub struct TermuxBattery {
    program: String,
    timeout: Duration,
}

impl Default for TermuxBattery {
    fn default() -> Self {
        Self {
            program: PROGRAM.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TermuxBattery {
    /// Uses a different executable, e.g. a wrapper script.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl BatteryProbe for TermuxBattery {
    async fn read(&self) -> Result<BatteryStatus, DeviceError> {
        let stdout = process::run(&self.program, &[], self.timeout).await?;
        let status = parse_status(&self.program, &stdout)?;
        tracing::info!(
            percentage = status.percentage,
            charging = status.charging,
            "battery status retrieved"
        );
        Ok(status)
    }
}

/// Subset of the `termux-battery-status` JSON we care about.
#[derive(Debug, Deserialize)]
struct RawStatus {
    #[serde(default)]
    percentage: i64,
    #[serde(default)]
    status: Option<String>,
}

fn parse_status(program: &str, stdout: &[u8]) -> Result<BatteryStatus, DeviceError> {
    let raw: RawStatus =
        serde_json::from_slice(stdout).map_err(|e| DeviceError::InvalidOutput {
            program: program.to_string(),
            reason: e.to_string(),
        })?;

    let percentage = u8::try_from(raw.percentage.clamp(0, 100)).unwrap_or(0);
    let charging = matches!(raw.status.as_deref(), Some("CHARGING" | "FULL"));

    Ok(BatteryStatus {
        percentage,
        charging,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<BatteryStatus, DeviceError> {
        parse_status(PROGRAM, json.as_bytes())
    }

    #[test]
    fn parses_termux_output() {
        let json = r#"{
            "health": "GOOD",
            "percentage": 42,
            "plugged": "UNPLUGGED",
            "status": "DISCHARGING",
            "temperature": 29.5,
            "current": -312000
        }"#;
        assert_eq!(
            parse(json).unwrap(),
            BatteryStatus {
                percentage: 42,
                charging: false
            }
        );
    }

    #[test]
    fn full_and_charging_count_as_charging() {
        assert!(parse(r#"{"percentage": 100, "status": "FULL"}"#).unwrap().charging);
        assert!(parse(r#"{"percentage": 55, "status": "CHARGING"}"#).unwrap().charging);
        assert!(!parse(r#"{"percentage": 55, "status": "NOT_CHARGING"}"#).unwrap().charging);
    }

    #[test]
    fn missing_fields_default() {
        let status = parse("{}").unwrap();
        assert_eq!(status.percentage, 0);
        assert!(!status.charging);
    }

    #[test]
    fn out_of_range_percentage_is_clamped() {
        assert_eq!(parse(r#"{"percentage": 140}"#).unwrap().percentage, 100);
        assert_eq!(parse(r#"{"percentage": -3}"#).unwrap().percentage, 0);
    }

    #[test]
    fn rejects_non_json() {
        let err = parse("termux-api not installed").unwrap_err();
        assert!(matches!(err, DeviceError::InvalidOutput { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn missing_program_is_reported() {
        let probe = TermuxBattery::default().with_program("wl-no-such-battery-tool");
        let err = probe.read().await.unwrap_err();
        assert!(matches!(err, DeviceError::CommandNotFound { .. }));
    }
}
