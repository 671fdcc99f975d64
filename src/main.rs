// src/main.rs

use preflight::boot::BootCommand;
use preflight::errors::{PreflightError, Result};
use preflight::{cli, exec, logging};

fn main() {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("preflight error: {err:?}");
        std::process::exit(1);
    }

    let command = match boot(args) {
        Ok(Some(command)) => command,
        // Dry-run: plan printed, nothing to exec.
        Ok(None) => return,
        Err(err) => {
            eprintln!("preflight error: {err}");
            std::process::exit(err.exit_code());
        }
    };

    // The runtime is dropped before exec so no worker threads outlive the
    // handoff; on success the call below never returns.
    let err = exec::handoff(&command);
    eprintln!("preflight error: {err}");
    std::process::exit(1);
}

fn boot(args: cli::CliArgs) -> Result<Option<BootCommand>> {
    let runtime = tokio::runtime::Runtime::new().map_err(PreflightError::from)?;
    runtime.block_on(preflight::run(args))
}
