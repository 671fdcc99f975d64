// src/lib.rs

pub mod boot;
pub mod cli;
pub mod config;
pub mod dsn;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod probe;

use std::path::PathBuf;

use tracing::info;

use crate::boot::{BootCommand, BootProfile};
use crate::cli::CliArgs;
use crate::config::loader::{default_config_path, load_and_validate};
use crate::config::{ConfigFile, TaskAction};
use crate::dsn::Detection;
use crate::errors::Result;
use crate::exec::{ShellExecutor, TaskExecutor};
use crate::fs::{FileSystem, RealFileSystem};
use crate::probe::{Dialer, RetryPolicy, TcpDialer};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - connection-string detection and readiness probing
/// - workload classification
/// - bootstrap task execution
///
/// Returns the workload command for `main` to exec once the async runtime
/// is gone, or `None` in dry-run mode.
pub async fn run(args: CliArgs) -> Result<Option<BootCommand>> {
    let config_path = args
        .config
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);
    let cfg = load_and_validate(&config_path)?;

    let command = BootCommand::new(args.command.clone());
    let profile = args.profile.map(BootProfile::from);

    if args.dry_run {
        print_dry_run(&cfg, profile, &command);
        return Ok(None);
    }

    let raw_dsn = std::env::var(&cfg.probe.env_var).ok();

    // Production backends; tests call `prepare` with fakes instead.
    let mut executor = ShellExecutor;
    let dialer = TcpDialer;
    let fs = RealFileSystem;

    prepare(
        &cfg,
        raw_dsn.as_deref(),
        profile,
        command,
        &mut executor,
        &dialer,
        &fs,
    )
    .await
    .map(Some)
}

/// Run the full boot sequence against injectable backends.
///
/// Each stage is a hard prerequisite for the next: detect the dependency,
/// probe it, classify the workload, run the applicable tasks. Returns the
/// unmodified workload command for the handoff.
pub async fn prepare(
    cfg: &ConfigFile,
    raw_dsn: Option<&str>,
    profile: Option<BootProfile>,
    command: BootCommand,
    executor: &mut dyn TaskExecutor,
    dialer: &dyn Dialer,
    fs: &dyn FileSystem,
) -> Result<BootCommand> {
    match dsn::detect(raw_dsn, cfg.probe.default_port)? {
        Detection::Endpoint(endpoint) => {
            let policy = RetryPolicy::from(&cfg.probe);
            probe::wait_until_ready(dialer, &endpoint, &policy).await?;
        }
        Detection::NotApplicable => {
            info!("no probed database configured; skipping readiness probe");
        }
    }

    let plan = boot::plan(cfg, profile, &command);
    let result = exec::run_tasks(executor, fs, &plan).await?;

    info!(
        executed = ?result.executed,
        skipped = ?result.skipped,
        "bootstrap complete"
    );

    Ok(command)
}

/// Simple dry-run output: print probe settings, the policy decision, and
/// the resolved task plan.
fn print_dry_run(cfg: &ConfigFile, profile: Option<BootProfile>, command: &BootCommand) {
    println!("preflight dry-run");
    println!("  probe.env_var = {}", cfg.probe.env_var);
    println!("  probe.interval_ms = {}", cfg.probe.interval_ms);
    println!("  probe.max_attempts = {}", cfg.probe.max_attempts);
    println!("  probe.default_port = {}", cfg.probe.default_port);
    println!("  workload: {}", command.display());
    println!();

    let plan = boot::plan(cfg, profile, command);

    println!("tasks that would run ({}):", plan.tasks.len());
    for task in plan.tasks.iter() {
        match &task.action {
            TaskAction::Command(cmd) => {
                println!("  - {} (cmd: {})", task.name, cmd);
            }
            TaskAction::EnsureDirs { paths, mode } => {
                let mode = mode
                    .map(|m| format!(" mode {m:o}"))
                    .unwrap_or_default();
                println!("  - {} (ensure_dirs: {:?}{})", task.name, paths, mode);
            }
        }
    }

    if !plan.skipped.is_empty() {
        println!("tasks gated off for this workload: {:?}", plan.skipped);
    }
}
