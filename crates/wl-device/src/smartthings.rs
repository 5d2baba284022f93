//! SmartThings device commands through the `smartthings` CLI.

use std::time::Duration;

use crate::{DeviceCommander, DeviceError, DeviceId, PowerSource, process};

const PROGRAM: &str = "smartthings";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Custom capability holding the phone's battery level on the virtual device.
const BATTERY_LEVEL_CAPABILITY: &str = "partyvoice23922.vbatterylevel";

/// Custom capability holding the phone's power source on the virtual device.
const POWER_SOURCE_CAPABILITY: &str = "partyvoice23922.powersource";

/// Command that sets the virtual battery level.
pub fn battery_level_command(percentage: u8) -> String {
    format!("{BATTERY_LEVEL_CAPABILITY}:setLevel({percentage})")
}

/// Command that sets the virtual power source. String arguments are quoted.
pub fn power_source_command(source: PowerSource) -> String {
    format!("{POWER_SOURCE_CAPABILITY}:setSource(\"{source}\")")
}

/// Sends commands via `smartthings devices:commands <device> <command>`.
///
/// The command string is passed as a single argument, never through a shell.
#[derive(Debug, Clone)]
pub struct SmartThingsCli {
    program: String,
    timeout: Duration,
}

impl Default for SmartThingsCli {
    fn default() -> Self {
        Self {
            program: PROGRAM.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SmartThingsCli {
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

impl DeviceCommander for SmartThingsCli {
    async fn send(&self, device: &DeviceId, command: &str) -> Result<(), DeviceError> {
        process::run(
            &self.program,
            &["devices:commands", device.as_str(), command],
            self.timeout,
        )
        .await?;
        tracing::debug!(%device, command, "device command sent");
        Ok(())
    }
}
