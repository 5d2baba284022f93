//! One-shot external command execution with a deadline.

use std::io;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::DeviceError;

/// Runs `program` with `args` and returns its stdout.
///
/// The child is killed if it outlives `timeout`. A non-zero exit is an error
/// carrying the trimmed stderr.
pub(crate) async fn run(
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<Vec<u8>, DeviceError> {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = match tokio::time::timeout(timeout, command.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) if e.kind() == io::ErrorKind::NotFound => {
            return Err(DeviceError::CommandNotFound {
                program: program.to_string(),
            });
        }
        Ok(Err(source)) => {
            return Err(DeviceError::Spawn {
                program: program.to_string(),
                source,
            });
        }
        Err(_) => {
            return Err(DeviceError::Timeout {
                program: program.to_string(),
                timeout,
            });
        }
    };

    if !output.status.success() {
        return Err(DeviceError::Failed {
            program: program.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output.stdout)
}
