// tests/runner_failfast.rs

mod common;
use crate::common::init_tracing;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use preflight::boot::{plan, BootCommand};
use preflight::config::TaskKind;
use preflight::errors::PreflightError;
use preflight::exec::run_tasks;
use preflight::fs::mock::MockFileSystem;
use preflight_test_utils::builders::ConfigFileBuilder;
use preflight_test_utils::fake_executor::FakeExecutor;

fn web_command() -> BootCommand {
    BootCommand::new(vec!["gunicorn".into(), "app:server".into()])
}

fn full_config() -> preflight::config::ConfigFile {
    ConfigFileBuilder::new()
        .prepare_always()
        .with_command_task("migrate", TaskKind::Prepare, "true")
        .with_command_task("collectstatic", TaskKind::Prepare, "true")
        .with_dirs_task(
            "runtime-dirs",
            TaskKind::Ancillary,
            &["staticfiles", "media", "logs"],
            Some("0755"),
        )
        .build()
}

#[tokio::test]
async fn all_tasks_succeed_reports_executed_in_order() {
    init_tracing();

    let cfg = full_config();
    let boot_plan = plan(&cfg, None, &web_command());

    let executed = Arc::new(Mutex::new(Vec::new()));
    let mut executor = FakeExecutor::new(executed.clone());
    let fs = MockFileSystem::new();

    let result = run_tasks(&mut executor, &fs, &boot_plan).await.unwrap();

    assert_eq!(result.executed, vec!["migrate", "collectstatic", "runtime-dirs"]);
    assert!(result.skipped.is_empty());
    assert_eq!(*executed.lock().unwrap(), vec!["migrate", "collectstatic"]);
}

#[tokio::test]
async fn mid_list_failure_stops_subsequent_tasks() {
    init_tracing();

    let cfg = full_config();
    let boot_plan = plan(&cfg, None, &web_command());

    let executed = Arc::new(Mutex::new(Vec::new()));
    let mut executor = FakeExecutor::new(executed.clone()).with_exit_code("collectstatic", 3);
    let fs = MockFileSystem::new();

    let result = run_tasks(&mut executor, &fs, &boot_plan).await;

    match result {
        Err(PreflightError::TaskFailure { task, code }) => {
            assert_eq!(task, "collectstatic");
            assert_eq!(code, 3);
        }
        other => panic!("Expected TaskFailure, got: {:?}", other),
    }

    // The failing task was attempted, nothing after it was.
    assert_eq!(*executed.lock().unwrap(), vec!["migrate", "collectstatic"]);
    assert!(fs.created_dirs().is_empty());
}

#[tokio::test]
async fn task_failure_exit_code_is_propagated() {
    init_tracing();

    let cfg = full_config();
    let boot_plan = plan(&cfg, None, &web_command());

    let executed = Arc::new(Mutex::new(Vec::new()));
    let mut executor = FakeExecutor::new(executed).with_exit_code("migrate", 7);
    let fs = MockFileSystem::new();

    let err = run_tasks(&mut executor, &fs, &boot_plan).await.unwrap_err();
    assert_eq!(err.exit_code(), 7);
}

#[tokio::test]
async fn dirs_task_creates_directories_and_normalizes_modes() {
    init_tracing();

    let cfg = full_config();
    let boot_plan = plan(&cfg, None, &web_command());

    let executed = Arc::new(Mutex::new(Vec::new()));
    let mut executor = FakeExecutor::new(executed);
    let fs = MockFileSystem::new();

    run_tasks(&mut executor, &fs, &boot_plan).await.unwrap();

    assert_eq!(
        fs.created_dirs(),
        vec![
            PathBuf::from("logs"),
            PathBuf::from("media"),
            PathBuf::from("staticfiles"),
        ]
    );
    assert_eq!(fs.mode_of("staticfiles"), Some(0o755));
    assert_eq!(fs.mode_of("media"), Some(0o755));
    assert_eq!(fs.mode_of("logs"), Some(0o755));
}

#[tokio::test]
async fn rerunning_the_sequence_converges() {
    init_tracing();

    let cfg = full_config();
    let boot_plan = plan(&cfg, None, &web_command());

    let executed = Arc::new(Mutex::new(Vec::new()));
    let mut executor = FakeExecutor::new(executed);
    let fs = MockFileSystem::new();

    let first = run_tasks(&mut executor, &fs, &boot_plan).await.unwrap();
    let dirs_after_first = fs.created_dirs();

    // Same environment, same plan: a container restart.
    let second = run_tasks(&mut executor, &fs, &boot_plan).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(fs.created_dirs(), dirs_after_first);
    assert_eq!(fs.mode_of("logs"), Some(0o755));
}

#[tokio::test]
async fn skipped_tasks_are_reported_but_never_executed() {
    init_tracing();

    let cfg = ConfigFileBuilder::new()
        .prepare_if_matches("gunicorn")
        .with_command_task("migrate", TaskKind::Prepare, "true")
        .with_dirs_task("runtime-dirs", TaskKind::Ancillary, &["logs"], None)
        .build();
    let worker = BootCommand::new(vec!["worker".into(), "--queue=default".into()]);
    let boot_plan = plan(&cfg, None, &worker);

    let executed = Arc::new(Mutex::new(Vec::new()));
    let mut executor = FakeExecutor::new(executed.clone());
    let fs = MockFileSystem::new();

    let result = run_tasks(&mut executor, &fs, &boot_plan).await.unwrap();

    assert_eq!(result.executed, vec!["runtime-dirs"]);
    assert_eq!(result.skipped, vec!["migrate"]);
    assert!(executed.lock().unwrap().is_empty());
}
