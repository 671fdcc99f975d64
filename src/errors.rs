// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreflightError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("dependency {host}:{port} still unreachable after {attempts} attempts")]
    DependencyUnavailable {
        host: String,
        port: u16,
        attempts: u32,
    },

    #[error("bootstrap task '{task}' failed with exit code {code}")]
    TaskFailure { task: String, code: i32 },

    #[error("handoff to workload failed: {0}")]
    HandoffError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PreflightError {
    /// Process exit code for a fatal boot error.
    ///
    /// A failing bootstrap task propagates its own exit code; everything else
    /// maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            PreflightError::TaskFailure { code, .. } if *code > 0 => *code,
            _ => 1,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PreflightError>;
