// src/boot/mod.rs

//! Boot-sequence model: the workload command, boot profiles, and the plan
//! that decides which bootstrap tasks run before handoff.

pub mod classify;

pub use classify::{plan, BootPlan, BootProfile};

/// The workload the orchestrator eventually becomes.
///
/// Supplied by the container launcher as trailing arguments; read-only and
/// passed through to the handoff byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootCommand {
    pub argv: Vec<String>,
}

impl BootCommand {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }

    /// The argv joined with spaces, for matching and for logs.
    pub fn display(&self) -> String {
        self.argv.join(" ")
    }
}

/// Summary of a completed bootstrap run. Transient; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootResult {
    /// Names of tasks that ran, in execution order.
    pub executed: Vec<String>,
    /// Names of tasks the classification policy skipped.
    pub skipped: Vec<String>,
}
