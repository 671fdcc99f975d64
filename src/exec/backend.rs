// src/exec/backend.rs

//! Pluggable task executor abstraction.
//!
//! The runner talks to a `TaskExecutor` instead of spawning processes
//! directly. This makes it easy to swap in a fake executor in tests while
//! keeping the production implementation here.
//!
//! - `ShellExecutor` is the default implementation used by `preflight`. It
//!   runs each task command through the platform shell and reports the exit
//!   code.
//! - Tests can provide their own `TaskExecutor` that, for example, records
//!   which tasks ran and returns scripted exit codes.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::Result;

/// Trait abstracting how a single task command is executed.
///
/// Production code uses [`ShellExecutor`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait TaskExecutor: Send {
    /// Run the command to completion and return its exit code.
    ///
    /// An `Err` means the command could not be run at all (e.g. the shell
    /// failed to spawn); a non-zero exit code is reported as `Ok`.
    fn run(
        &mut self,
        task: String,
        cmd: String,
    ) -> Pin<Box<dyn Future<Output = Result<i32>> + Send + '_>>;
}

/// Real executor used in production: runs the command through `sh -c`
/// (or `cmd /C` on Windows) and drains its output into the log.
#[derive(Debug, Clone, Default)]
pub struct ShellExecutor;

impl TaskExecutor for ShellExecutor {
    fn run(
        &mut self,
        task: String,
        cmd: String,
    ) -> Pin<Box<dyn Future<Output = Result<i32>> + Send + '_>> {
        Box::pin(async move {
            info!(task = %task, cmd = %cmd, "starting task process");

            // Build a shell command appropriate for the platform.
            let mut command = if cfg!(windows) {
                let mut c = Command::new("cmd");
                c.arg("/C").arg(&cmd);
                c
            } else {
                let mut c = Command::new("sh");
                c.arg("-c").arg(&cmd);
                c
            };

            command
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true);

            let mut child = command
                .spawn()
                .with_context(|| format!("spawning process for task '{task}'"))?;

            let stdout = child.stdout.take();
            let stderr = child.stderr.take();

            if let Some(stdout) = stdout {
                let task = task.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(stdout);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        info!(task = %task, "stdout: {}", line);
                    }
                });
            }

            // Always consume stderr so buffers don't fill; log at debug.
            if let Some(stderr) = stderr {
                let task = task.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(stderr);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        debug!(task = %task, "stderr: {}", line);
                    }
                });
            }

            let status = child
                .wait()
                .await
                .with_context(|| format!("waiting for process of task '{task}'"))?;

            let code = status.code().unwrap_or(-1);
            info!(
                task = %task,
                exit_code = code,
                success = status.success(),
                "task process exited"
            );

            Ok(code)
        })
    }
}
