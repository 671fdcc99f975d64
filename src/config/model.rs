// src/config/model.rs

use std::path::PathBuf;

use regex::Regex;
use serde::Deserialize;

/// Top-level configuration as read from a TOML file, before validation.
///
/// This is a direct mapping of the file:
///
/// ```toml
/// [probe]
/// env_var = "DATABASE_URL"
/// interval_ms = 500
/// max_attempts = 120
///
/// [prepare]
/// mode = "if-matches"
/// match = "gunicorn|daphne"
///
/// [[task]]
/// name = "migrate"
/// cmd = "python manage.py migrate --noinput"
/// ```
///
/// All sections are optional and have reasonable defaults, except that at
/// least one `[[task]]` must be present.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Dependency probing config from `[probe]`.
    #[serde(default)]
    pub probe: ProbeSection,

    /// Classification policy from `[prepare]`.
    #[serde(default)]
    pub prepare: PrepareSection,

    /// Ordered task list from `[[task]]`. File order is execution order.
    #[serde(default)]
    pub task: Vec<RawTaskConfig>,
}

/// `[probe]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeSection {
    /// Environment variable holding the connection string.
    #[serde(default = "default_env_var")]
    pub env_var: String,

    /// Delay between connect attempts, in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Maximum connect attempts before giving up. 0 means retry forever,
    /// matching the original entrypoint scripts.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Port substituted when the connection string carries none.
    #[serde(default = "default_port")]
    pub default_port: u16,
}

fn default_env_var() -> String {
    "DATABASE_URL".to_string()
}

fn default_interval_ms() -> u64 {
    500
}

fn default_max_attempts() -> u32 {
    120
}

fn default_port() -> u16 {
    5432
}

impl Default for ProbeSection {
    fn default() -> Self {
        Self {
            env_var: default_env_var(),
            interval_ms: default_interval_ms(),
            max_attempts: default_max_attempts(),
            default_port: default_port(),
        }
    }
}

/// `[prepare]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PrepareSection {
    /// `"always"` or `"if-matches"`.
    #[serde(default)]
    pub mode: PrepareMode,

    /// Regex matched against the workload argv (joined with spaces).
    /// Required when `mode = "if-matches"`.
    #[serde(default, rename = "match")]
    pub match_pattern: Option<String>,

    /// When true, ancillary tasks obey the same gate as preparation tasks
    /// instead of running unconditionally.
    #[serde(default)]
    pub gate_ancillary: bool,
}

/// Classification mode as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PrepareMode {
    /// Run preparation tasks for every workload.
    #[default]
    Always,
    /// Run preparation tasks only when the workload argv matches `match`.
    IfMatches,
}

/// `[[task]]` entry, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTaskConfig {
    /// Unique task name, used in logs and failure reports.
    pub name: String,

    /// `"prepare"` (gated by classification) or `"ancillary"`.
    #[serde(default)]
    pub kind: TaskKind,

    /// Shell command to execute. Mutually exclusive with `ensure_dirs`.
    #[serde(default)]
    pub cmd: Option<String>,

    /// Directories to create (and normalize). Mutually exclusive with `cmd`.
    #[serde(default)]
    pub ensure_dirs: Option<Vec<PathBuf>>,

    /// Octal permission string, e.g. `"0755"`. Only valid with `ensure_dirs`.
    #[serde(default)]
    pub mode: Option<String>,
}

/// Which gate applies to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Mutates durable state; runs only for workloads the classification
    /// policy recognizes as the primary web process.
    #[default]
    Prepare,
    /// Runs for every workload type (unless `gate_ancillary` is set).
    Ancillary,
}

/// What a validated task actually does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAction {
    /// An opaque shell command; only its exit status is interpreted.
    Command(String),
    /// Built-in directory creation and permission normalization.
    EnsureDirs {
        paths: Vec<PathBuf>,
        mode: Option<u32>,
    },
}

/// A validated task.
#[derive(Debug, Clone)]
pub struct TaskSpec {
    pub name: String,
    pub kind: TaskKind,
    pub action: TaskAction,
}

/// Classification policy after validation, with the match regex compiled.
#[derive(Debug, Clone)]
pub enum PreparePolicy {
    Always,
    IfMatches(Regex),
}

/// `[prepare]` after validation.
#[derive(Debug, Clone)]
pub struct PrepareConfig {
    pub policy: PreparePolicy,
    pub gate_ancillary: bool,
}

/// Validated top-level configuration.
///
/// Construct via `ConfigFile::try_from(raw)` (see [`super::validate`]) or
/// [`super::loader::load_and_validate`].
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub probe: ProbeSection,
    pub prepare: PrepareConfig,
    pub tasks: Vec<TaskSpec>,
}

impl ConfigFile {
    /// Assemble a config from already-validated parts.
    pub fn new_unchecked(
        probe: ProbeSection,
        prepare: PrepareConfig,
        tasks: Vec<TaskSpec>,
    ) -> Self {
        Self {
            probe,
            prepare,
            tasks,
        }
    }
}
