// src/boot/classify.rs

//! Workload classification.
//!
//! Decides which bootstrap tasks apply to the command about to run. Two
//! inputs can settle the question:
//!
//! - an explicit [`BootProfile`] from the CLI, which wins outright, or
//! - the configured [`PreparePolicy`]: run always, or run only when the
//!   workload argv matches a pattern (the historical behaviour, kept as a
//!   policy because a non-matching web command silently skips preparation).

use tracing::{debug, info};

use crate::config::{ConfigFile, PreparePolicy, TaskKind, TaskSpec};

use super::BootCommand;

/// Explicit boot profile, selectable via `--profile`.
///
/// Only the primary web process runs preparation tasks; workers and one-off
/// management commands skip them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootProfile {
    Web,
    Worker,
    Management,
}

impl BootProfile {
    pub fn runs_prepare(self) -> bool {
        matches!(self, BootProfile::Web)
    }
}

/// The ordered list of tasks to run, plus the ones that were gated off.
#[derive(Debug, Clone, Default)]
pub struct BootPlan {
    pub tasks: Vec<TaskSpec>,
    pub skipped: Vec<String>,
}

/// Decide which configured tasks apply to this boot.
///
/// Task order from the config file is preserved; classification only
/// filters, it never reorders.
pub fn plan(cfg: &ConfigFile, profile: Option<BootProfile>, command: &BootCommand) -> BootPlan {
    let prepare_applies = match profile {
        Some(profile) => {
            info!(?profile, "explicit boot profile set; skipping command matching");
            profile.runs_prepare()
        }
        None => policy_matches(&cfg.prepare.policy, command),
    };

    let ancillary_applies = if cfg.prepare.gate_ancillary {
        prepare_applies
    } else {
        true
    };

    let mut tasks = Vec::new();
    let mut skipped = Vec::new();

    for task in cfg.tasks.iter() {
        let applies = match task.kind {
            TaskKind::Prepare => prepare_applies,
            TaskKind::Ancillary => ancillary_applies,
        };

        if applies {
            tasks.push(task.clone());
        } else {
            debug!(task = %task.name, kind = ?task.kind, "task gated off for this workload");
            skipped.push(task.name.clone());
        }
    }

    BootPlan { tasks, skipped }
}

fn policy_matches(policy: &PreparePolicy, command: &BootCommand) -> bool {
    match policy {
        PreparePolicy::Always => true,
        PreparePolicy::IfMatches(regex) => {
            let line = command.display();
            let matched = regex.is_match(&line);
            debug!(
                pattern = %regex.as_str(),
                command = %line,
                matched,
                "classified workload by command matching"
            );
            matched
        }
    }
}
