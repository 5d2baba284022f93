//! Battery sync command: mirror the phone's battery onto SmartThings.

use std::io::Write;

use anyhow::{Context, Result};
use wl_device::{DeviceId, SmartThingsCli, TermuxBattery, sync_battery};

use crate::Config;

/// Resolves the target device from the flag, falling back to the config.
fn resolve_device(config: &Config, device: Option<&str>) -> Result<DeviceId> {
    let raw = device
        .or(config.device_id.as_deref())
        .context("no SmartThings device configured (pass --device or set WL_DEVICE_ID)")?;
    DeviceId::new(raw).context("invalid SmartThings device ID")
}

pub fn run<W: Write>(writer: &mut W, config: &Config, device: Option<&str>) -> Result<()> {
    let device = resolve_device(config, device)?;

    let runtime = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
    let report = runtime
        .block_on(sync_battery(
            &TermuxBattery::default(),
            &SmartThingsCli::default(),
            &device,
        ))
        .context("failed to read battery status")?;

    writeln!(
        writer,
        "Battery {}% ({})",
        report.status.percentage,
        report.status.power_source()
    )?;
    if !report.is_complete() {
        writeln!(writer, "Some SmartThings commands failed; see warnings above.")?;
    }
    Ok(())
}
