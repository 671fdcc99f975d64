// tests/cli_args.rs

use clap::Parser;
use preflight::cli::{CliArgs, ProfileArg};

#[test]
fn trailing_command_is_captured_verbatim() {
    let args = CliArgs::try_parse_from([
        "preflight",
        "--profile",
        "web",
        "--",
        "gunicorn",
        "wingman.wsgi:application",
        "--bind",
        "0.0.0.0:8000",
    ])
    .unwrap();

    assert!(matches!(args.profile, Some(ProfileArg::Web)));
    assert_eq!(
        args.command,
        vec!["gunicorn", "wingman.wsgi:application", "--bind", "0.0.0.0:8000"]
    );
}

#[test]
fn command_flags_survive_without_separator() {
    let args =
        CliArgs::try_parse_from(["preflight", "celery", "-A", "wingman", "worker"]).unwrap();

    assert_eq!(args.command, vec!["celery", "-A", "wingman", "worker"]);
    assert!(args.profile.is_none());
    assert!(!args.dry_run);
}

#[test]
fn missing_command_is_an_error() {
    assert!(CliArgs::try_parse_from(["preflight", "--dry-run"]).is_err());
}
