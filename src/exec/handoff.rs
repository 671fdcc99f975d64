// src/exec/handoff.rs

//! Final transfer of control to the workload.
//!
//! On Unix this is an exec-style replacement of the current process image:
//! no fork, no child supervision. The workload keeps the orchestrator's
//! PID, environment, working directory, and signal routing, so the
//! container runtime continues to address the same process for the rest of
//! the container's life.

use std::process::Command;

use tracing::info;

use crate::boot::BootCommand;
use crate::errors::PreflightError;

/// Replace the current process with the workload command.
///
/// On success this never returns. The only way out is failure, which is
/// returned as a [`PreflightError::HandoffError`]; no fallback command is
/// attempted.
#[cfg(unix)]
pub fn handoff(command: &BootCommand) -> PreflightError {
    use std::os::unix::process::CommandExt;

    let (program, args) = match command.argv.split_first() {
        Some(parts) => parts,
        None => return PreflightError::HandoffError("workload command is empty".to_string()),
    };

    info!(command = %command.display(), "handing off to workload");

    let err = Command::new(program).args(args).exec();
    PreflightError::HandoffError(format!("exec '{program}' failed: {err}"))
}

/// Fallback for platforms without exec semantics: spawn the workload, wait
/// for it, and exit with its status.
#[cfg(not(unix))]
pub fn handoff(command: &BootCommand) -> PreflightError {
    let (program, args) = match command.argv.split_first() {
        Some(parts) => parts,
        None => return PreflightError::HandoffError("workload command is empty".to_string()),
    };

    info!(command = %command.display(), "handing off to workload");

    let status = match Command::new(program).args(args).status() {
        Ok(status) => status,
        Err(err) => {
            return PreflightError::HandoffError(format!("running '{program}' failed: {err}"));
        }
    };

    std::process::exit(status.code().unwrap_or(1));
}
