// src/config/mod.rs

//! Configuration loading, model, and validation.
//!
//! The boot sequence is parameterized by one TOML file: which environment
//! variable carries the dependency's connection string, how patiently to
//! probe it, which classification policy gates the preparation tasks, and
//! the ordered task list itself. One binary, instantiated differently per
//! deployment, replaces the old copy-pasted entrypoint scripts.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{
    ConfigFile, PrepareConfig, PrepareMode, PreparePolicy, PrepareSection, ProbeSection,
    RawConfigFile, RawTaskConfig, TaskAction, TaskKind, TaskSpec,
};
