//! Binary entrypoint for the request adapter.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use tc_adapter::{ADAPTER_TARGET, report_failure, run, telemetry};
use tc_config::Config;
use tc_dao::Dispatcher;

fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(error) => {
            writeln!(io::stderr().lock(), "failed to load configuration: {error}").ok();
            return ExitCode::FAILURE;
        }
    };

    if let Err(error) = telemetry::initialise(&config) {
        writeln!(io::stderr().lock(), "{error}").ok();
        return ExitCode::FAILURE;
    }

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    match run(&mut reader, &mut writer, &Dispatcher::new()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::warn!(target: ADAPTER_TARGET, %error, "request not handled");
            report_failure(&mut writer, &error).ok();
            ExitCode::FAILURE
        }
    }
}
