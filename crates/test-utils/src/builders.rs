#![allow(dead_code)]

use std::path::PathBuf;

use preflight::config::{
    ConfigFile, PrepareMode, PrepareSection, ProbeSection, RawConfigFile, RawTaskConfig, TaskKind,
};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                probe: ProbeSection::default(),
                prepare: PrepareSection::default(),
                task: Vec::new(),
            },
        }
    }

    pub fn with_env_var(mut self, var: &str) -> Self {
        self.config.probe.env_var = var.to_string();
        self
    }

    pub fn with_interval_ms(mut self, ms: u64) -> Self {
        self.config.probe.interval_ms = ms;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.config.probe.max_attempts = attempts;
        self
    }

    pub fn with_default_port(mut self, port: u16) -> Self {
        self.config.probe.default_port = port;
        self
    }

    pub fn prepare_always(mut self) -> Self {
        self.config.prepare.mode = PrepareMode::Always;
        self.config.prepare.match_pattern = None;
        self
    }

    pub fn prepare_if_matches(mut self, pattern: &str) -> Self {
        self.config.prepare.mode = PrepareMode::IfMatches;
        self.config.prepare.match_pattern = Some(pattern.to_string());
        self
    }

    pub fn gate_ancillary(mut self, val: bool) -> Self {
        self.config.prepare.gate_ancillary = val;
        self
    }

    pub fn with_command_task(mut self, name: &str, kind: TaskKind, cmd: &str) -> Self {
        self.config.task.push(RawTaskConfig {
            name: name.to_string(),
            kind,
            cmd: Some(cmd.to_string()),
            ensure_dirs: None,
            mode: None,
        });
        self
    }

    pub fn with_dirs_task(
        mut self,
        name: &str,
        kind: TaskKind,
        dirs: &[&str],
        mode: Option<&str>,
    ) -> Self {
        self.config.task.push(RawTaskConfig {
            name: name.to_string(),
            kind,
            cmd: None,
            ensure_dirs: Some(dirs.iter().map(|d| PathBuf::from(*d)).collect()),
            mode: mode.map(|m| m.to_string()),
        });
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
