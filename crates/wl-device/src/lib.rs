//! Phone and home-automation integration for the commute worklog.
//!
//! Provides two capabilities backed by external command-line tools:
//! - Reading the phone's battery level and charging state (`termux-battery-status`)
//! - Sending capability commands to a SmartThings device (`smartthings` CLI)
//!
//! Both are traits so that the glue in [`sync`] can be exercised with fakes.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;

mod process;
pub mod smartthings;
pub mod sync;
pub mod termux;

pub use smartthings::SmartThingsCli;
pub use sync::{SyncReport, sync_battery};
pub use termux::TermuxBattery;

/// Errors from external device tooling.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The device identifier was empty.
    #[error("device ID cannot be empty")]
    EmptyDeviceId,
    /// The external program is not installed.
    #[error("'{program}' command not found")]
    CommandNotFound { program: String },
    /// The external program could not be started.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The external program did not finish in time.
    #[error("'{program}' timed out after {}s", timeout.as_secs())]
    Timeout { program: String, timeout: Duration },
    /// The external program exited unsuccessfully.
    #[error("'{program}' failed ({status}): {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
    /// The external program printed something we couldn't interpret.
    #[error("invalid output from '{program}': {reason}")]
    InvalidOutput { program: String, reason: String },
}

/// A validated SmartThings device identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceId(String);

impl DeviceId {
    /// Creates a new ID after validation.
    pub fn new(id: impl Into<String>) -> Result<Self, DeviceError> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(DeviceError::EmptyDeviceId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Battery state as reported by the phone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryStatus {
    /// Charge level, 0-100.
    pub percentage: u8,
    /// True while plugged in, including when already full.
    pub charging: bool,
}

impl BatteryStatus {
    pub const fn power_source(self) -> PowerSource {
        if self.charging {
            PowerSource::Dc
        } else {
            PowerSource::Battery
        }
    }
}

/// Where the phone is drawing power from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerSource {
    Dc,
    Battery,
}

impl PowerSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dc => "DC",
            Self::Battery => "Battery",
        }
    }
}

impl fmt::Display for PowerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads the current battery state.
pub trait BatteryProbe: Send + Sync {
    fn read(&self) -> impl Future<Output = Result<BatteryStatus, DeviceError>> + Send;
}

/// Sends a capability command to a remote device.
pub trait DeviceCommander: Send + Sync {
    fn send(
        &self,
        device: &DeviceId,
        command: &str,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send;
}
