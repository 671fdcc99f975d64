// tests/shell_executor.rs

//! Exercises the real shell executor with short-lived commands.

#![cfg(unix)]

mod common;
use crate::common::init_tracing;

use preflight::boot::{plan, BootCommand};
use preflight::config::TaskKind;
use preflight::errors::PreflightError;
use preflight::exec::{run_tasks, ShellExecutor, TaskExecutor};
use preflight::fs::mock::MockFileSystem;
use preflight_test_utils::builders::ConfigFileBuilder;

#[tokio::test]
async fn reports_the_exit_code_of_the_command() {
    init_tracing();

    let mut executor = ShellExecutor;

    let code = executor
        .run("ok".to_string(), "exit 0".to_string())
        .await
        .unwrap();
    assert_eq!(code, 0);

    let code = executor
        .run("fail".to_string(), "exit 3".to_string())
        .await
        .unwrap();
    assert_eq!(code, 3);
}

#[tokio::test]
async fn drains_stdout_and_stderr_without_blocking() {
    init_tracing();

    let mut executor = ShellExecutor;

    let code = executor
        .run(
            "noisy".to_string(),
            "echo out; echo err >&2; exit 0".to_string(),
        )
        .await
        .unwrap();
    assert_eq!(code, 0);
}

#[tokio::test]
async fn runner_with_real_shell_stops_at_first_failure() {
    init_tracing();

    let cfg = ConfigFileBuilder::new()
        .prepare_always()
        .with_command_task("first", TaskKind::Prepare, "true")
        .with_command_task("second", TaskKind::Prepare, "exit 5")
        .with_command_task("third", TaskKind::Prepare, "true")
        .build();
    let command = BootCommand::new(vec!["gunicorn".into()]);
    let boot_plan = plan(&cfg, None, &command);

    let mut executor = ShellExecutor;
    let fs = MockFileSystem::new();

    let result = run_tasks(&mut executor, &fs, &boot_plan).await;

    match result {
        Err(PreflightError::TaskFailure { task, code }) => {
            assert_eq!(task, "second");
            assert_eq!(code, 5);
        }
        other => panic!("Expected TaskFailure, got: {:?}", other),
    }
}
