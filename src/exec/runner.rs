// src/exec/runner.rs

//! Ordered bootstrap task execution.
//!
//! Tasks run strictly in plan order. The first non-zero exit aborts the
//! remainder; nothing is retried. Recovery is the container restarting and
//! re-running the (idempotent) sequence from the top.

use std::path::PathBuf;

use tracing::{error, info};

use crate::boot::{BootPlan, BootResult};
use crate::config::TaskAction;
use crate::errors::{PreflightError, Result};
use crate::fs::FileSystem;

use super::backend::TaskExecutor;

/// Execute every task in the plan, in order, stopping at the first failure.
pub async fn run_tasks(
    executor: &mut dyn TaskExecutor,
    fs: &dyn FileSystem,
    plan: &BootPlan,
) -> Result<BootResult> {
    let mut executed = Vec::with_capacity(plan.tasks.len());

    for task in plan.tasks.iter() {
        info!(task = %task.name, "running bootstrap task");

        let code = match &task.action {
            TaskAction::Command(cmd) => {
                executor.run(task.name.clone(), cmd.clone()).await?
            }
            TaskAction::EnsureDirs { paths, mode } => {
                match ensure_dirs(fs, paths, *mode) {
                    Ok(()) => 0,
                    Err(err) => {
                        error!(task = %task.name, error = %err, "directory preparation failed");
                        1
                    }
                }
            }
        };

        if code != 0 {
            error!(
                task = %task.name,
                exit_code = code,
                "bootstrap task failed; aborting boot sequence"
            );
            return Err(PreflightError::TaskFailure {
                task: task.name.clone(),
                code,
            });
        }

        executed.push(task.name.clone());
    }

    Ok(BootResult {
        executed,
        skipped: plan.skipped.clone(),
    })
}

/// Create each directory and normalize its permissions.
///
/// Both steps are idempotent: existing directories are left alone and
/// re-applying the same mode changes nothing.
fn ensure_dirs(fs: &dyn FileSystem, paths: &[PathBuf], mode: Option<u32>) -> anyhow::Result<()> {
    for path in paths {
        fs.create_dir_all(path)?;
        if let Some(mode) = mode {
            fs.set_mode(path, mode)?;
        }
    }
    Ok(())
}
