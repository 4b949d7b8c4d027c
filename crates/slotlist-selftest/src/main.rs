use std::path::PathBuf;
use std::process::ExitCode;

use slotlist_selftest::{run_scenario, DEFAULT_DOT_PATH};
use tracing_subscriber::EnvFilter;

const BANNER: &str = "##############################";

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn main() -> ExitCode {
    enable_tracing();

    let dot_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DOT_PATH));

    let run = match run_scenario() {
        Ok(run) => run,
        Err(e) => {
            tracing::error!("scenario aborted: {e}");
            println!("{BANNER}\nUnit testing failed!\n{BANNER}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = std::fs::write(&dot_path, &run.dot) {
        tracing::warn!("could not write {}: {e}", dot_path.display());
    } else {
        tracing::info!("dump written to {}", dot_path.display());
    }

    if run.report.passed() {
        println!("{BANNER}\nUnit testing finished successfully!\n{BANNER}");
        ExitCode::SUCCESS
    } else {
        let failed = run.report.failures().count();
        tracing::error!(failed, total = run.report.checks().len(), "assertions failed");
        println!("{BANNER}\nUnit testing failed!\n{BANNER}");
        ExitCode::FAILURE
    }
}
