// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The workload command is everything after the flags (optionally separated
//! with `--`), e.g.:
//!
//! `preflight --profile web -- gunicorn wingman.wsgi:application`

use clap::{Parser, ValueEnum};

use crate::boot::BootProfile;

/// Command-line arguments for `preflight`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "preflight",
    version,
    about = "Bring a container to a ready state, then exec the workload.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `PREFLIGHT_CONFIG` if set, otherwise `Preflight.toml` in the
    /// current working directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Explicit boot profile (web, worker, management).
    ///
    /// When given, preparation tasks are gated by the profile alone and the
    /// configured command-matching policy is ignored.
    #[arg(long, value_enum, value_name = "PROFILE")]
    pub profile: Option<ProfileArg>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PREFLIGHT_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve the boot plan and print it, but don't probe or execute.
    #[arg(long)]
    pub dry_run: bool,

    /// The workload command to exec once bootstrap completes.
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        required = true,
        value_name = "COMMAND"
    )]
    pub command: Vec<String>,
}

/// Boot profile as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum ProfileArg {
    Web,
    Worker,
    Management,
}

impl From<ProfileArg> for BootProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Web => BootProfile::Web,
            ProfileArg::Worker => BootProfile::Worker,
            ProfileArg::Management => BootProfile::Management,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
