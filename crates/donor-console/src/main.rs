use std::io;
use std::process::ExitCode;

use donor_console::{ConsoleConfig, ConsoleError, serve};
use tracing::{error, info};

fn main() -> ExitCode {
    // stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "donor-console failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ConsoleError> {
    let config = ConsoleConfig::from_env()?;
    info!(
        rules = ?config.rules_path,
        segments = ?config.segments_path,
        export_delay_ms = config.export_delay.as_millis() as u64,
        "starting donor-console"
    );

    let mut session = config.session()?;
    serve(&mut session, io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}
