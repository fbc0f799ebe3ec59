//! Platform reboot execution

use tokio::process::Command;
use tracing::info;

use crate::error::RebootError;

/// The platform's immediate-reboot command, if one is known.
fn reboot_command() -> Option<(&'static str, &'static [&'static str])> {
    if cfg!(target_os = "linux") {
        Some(("systemctl", &["reboot"]))
    } else if cfg!(target_os = "macos") {
        Some(("shutdown", &["-r", "now"]))
    } else if cfg!(target_os = "windows") {
        Some(("shutdown", &["/r", "/t", "0"]))
    } else {
        None
    }
}

/// Restart the host immediately.
///
/// Irreversible on success: the process will not observe further
/// execution. On failure the error is returned for the caller to surface
/// to the user; callers must not retry on their own.
pub async fn execute_system_reboot() -> Result<(), RebootError> {
    let (program, args) = reboot_command().ok_or(RebootError::Unsupported)?;
    info!("Executing platform reboot: {} {}", program, args.join(" "));

    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(RebootError::Spawn)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(RebootError::CommandFailed {
            status: output.status.to_string(),
            stderr,
        });
    }

    info!("Reboot command executed");
    Ok(())
}

/// Check that the platform reboot command can be spawned at all.
///
/// The probe only verifies the command exists; its exit status is ignored.
pub async fn check_reboot_support() -> Result<(), RebootError> {
    let (program, _) = reboot_command().ok_or(RebootError::Unsupported)?;

    let probe_arg = if cfg!(target_os = "linux") { "--version" } else { "--help" };
    Command::new(program)
        .arg(probe_arg)
        .output()
        .await
        .map_err(RebootError::Spawn)?;

    info!("Reboot command '{}' is available", program);
    Ok(())
}
