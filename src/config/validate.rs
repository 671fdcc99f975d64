// src/config/validate.rs

use std::collections::BTreeSet;

use regex::Regex;

use crate::config::model::{
    ConfigFile, PrepareConfig, PrepareMode, PreparePolicy, RawConfigFile, RawTaskConfig,
    TaskAction, TaskSpec,
};
use crate::errors::{Result, PreflightError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::PreflightError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_probe(&raw)?;
        ensure_has_tasks(&raw)?;
        let prepare = convert_prepare(&raw)?;
        let tasks = convert_tasks(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.probe, prepare, tasks))
    }
}

fn ensure_has_tasks(cfg: &RawConfigFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(PreflightError::ConfigError(
            "config must contain at least one [[task]] entry".to_string(),
        ));
    }
    Ok(())
}

fn validate_probe(cfg: &RawConfigFile) -> Result<()> {
    if cfg.probe.env_var.trim().is_empty() {
        return Err(PreflightError::ConfigError(
            "[probe].env_var must not be empty".to_string(),
        ));
    }

    if cfg.probe.interval_ms == 0 {
        return Err(PreflightError::ConfigError(
            "[probe].interval_ms must be >= 1 (got 0)".to_string(),
        ));
    }

    if cfg.probe.default_port == 0 {
        return Err(PreflightError::ConfigError(
            "[probe].default_port must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn convert_prepare(cfg: &RawConfigFile) -> Result<PrepareConfig> {
    let policy = match cfg.prepare.mode {
        PrepareMode::Always => PreparePolicy::Always,
        PrepareMode::IfMatches => {
            let pattern = match cfg.prepare.match_pattern.as_deref() {
                Some(p) if !p.trim().is_empty() => p,
                _ => {
                    return Err(PreflightError::ConfigError(
                        "[prepare] mode = \"if-matches\" requires a non-empty `match` pattern"
                            .to_string(),
                    ));
                }
            };

            let regex = Regex::new(pattern).map_err(|e| {
                PreflightError::ConfigError(format!(
                    "[prepare].match is not a valid regex: {e}"
                ))
            })?;

            PreparePolicy::IfMatches(regex)
        }
    };

    Ok(PrepareConfig {
        policy,
        gate_ancillary: cfg.prepare.gate_ancillary,
    })
}

fn convert_tasks(cfg: &RawConfigFile) -> Result<Vec<TaskSpec>> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut tasks = Vec::with_capacity(cfg.task.len());

    for task in cfg.task.iter() {
        if task.name.trim().is_empty() {
            return Err(PreflightError::ConfigError(
                "[[task]] entries must have a non-empty `name`".to_string(),
            ));
        }
        if !seen.insert(task.name.as_str()) {
            return Err(PreflightError::ConfigError(format!(
                "duplicate task name '{}'",
                task.name
            )));
        }

        tasks.push(TaskSpec {
            name: task.name.clone(),
            kind: task.kind,
            action: convert_action(task)?,
        });
    }

    Ok(tasks)
}

fn convert_action(task: &RawTaskConfig) -> Result<TaskAction> {
    match (&task.cmd, &task.ensure_dirs) {
        (Some(cmd), None) => {
            if cmd.trim().is_empty() {
                return Err(PreflightError::ConfigError(format!(
                    "task '{}' has an empty `cmd`",
                    task.name
                )));
            }
            if task.mode.is_some() {
                return Err(PreflightError::ConfigError(format!(
                    "task '{}' sets `mode`, which is only valid with `ensure_dirs`",
                    task.name
                )));
            }
            Ok(TaskAction::Command(cmd.clone()))
        }
        (None, Some(dirs)) => {
            if dirs.is_empty() {
                return Err(PreflightError::ConfigError(format!(
                    "task '{}' has an empty `ensure_dirs` list",
                    task.name
                )));
            }
            let mode = task.mode.as_deref().map(|m| parse_octal_mode(&task.name, m)).transpose()?;
            Ok(TaskAction::EnsureDirs {
                paths: dirs.clone(),
                mode,
            })
        }
        (Some(_), Some(_)) => Err(PreflightError::ConfigError(format!(
            "task '{}' sets both `cmd` and `ensure_dirs`; pick one",
            task.name
        ))),
        (None, None) => Err(PreflightError::ConfigError(format!(
            "task '{}' needs either `cmd` or `ensure_dirs`",
            task.name
        ))),
    }
}

fn parse_octal_mode(task: &str, text: &str) -> Result<u32> {
    let digits = text.trim().trim_start_matches("0o");
    u32::from_str_radix(digits, 8).map_err(|_| {
        PreflightError::ConfigError(format!(
            "task '{task}' has invalid octal `mode` '{text}'"
        ))
    })
}
