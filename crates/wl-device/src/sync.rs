//! Mirrors the phone's battery state onto a SmartThings virtual device.

use crate::smartthings::{battery_level_command, power_source_command};
use crate::{BatteryProbe, BatteryStatus, DeviceCommander, DeviceError, DeviceId};

/// What a sync run managed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub status: BatteryStatus,
    pub level_sent: bool,
    pub source_sent: bool,
}

impl SyncReport {
    pub const fn is_complete(&self) -> bool {
        self.level_sent && self.source_sent
    }
}

/// Reads the battery once and pushes level and power source to `device`.
///
/// A failed read is returned and nothing is sent. A failed send is logged
/// and recorded in the report; the other command is still attempted. There
/// are no retries: the next scheduled run catches up.
pub async fn sync_battery<P, C>(
    probe: &P,
    commander: &C,
    device: &DeviceId,
) -> Result<SyncReport, DeviceError>
where
    P: BatteryProbe,
    C: DeviceCommander,
{
    let status = probe.read().await?;

    let level_sent =
        send_logged(commander, device, &battery_level_command(status.percentage)).await;
    let source_sent =
        send_logged(commander, device, &power_source_command(status.power_source())).await;

    Ok(SyncReport {
        status,
        level_sent,
        source_sent,
    })
}

async fn send_logged<C: DeviceCommander>(commander: &C, device: &DeviceId, command: &str) -> bool {
    match commander.send(device, command).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(%device, command, error = %e, "device command failed");
            false
        }
    }
}
