//! ezproxy CLI - corporate proxy and CA trust for developer tools
//!
//! Usage: ezproxy <COMMAND>
//!
//! Commands:
//!   init     Write the settings document
//!   apply    Configure every enabled and installed tool
//!   remove   Undo ezproxy configuration
//!   status   Show per-tool status
//!   manage   Pick enabled tools interactively
//!   enable   Enable one tool and configure it
//!   disable  Disable one tool and remove its configuration
//!   list     List known tools

use std::io;
use std::process::ExitCode;

use clap::Parser;
use ezproxy::commands;
use ezproxy::presentation::{Cli, Runtime};
use ezproxy::ui::context::UiContext;
use ezproxy::ui::error::print_error;

/// Environment variable holding an `EnvFilter` directive
const LOG_VAR: &str = "EZPROXY_LOG";

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                // --help / --version
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.verbose);

    let runtime = match Runtime::from_cli(&cli) {
        Ok(runtime) => runtime,
        Err(err) => {
            let ui = UiContext::new(cli.json, cli.verbose, cli.color);
            print_error(&anyhow::Error::from(err), &ui);
            return ExitCode::FAILURE;
        }
    };

    match commands::dispatch(cli.command, &runtime) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&err, &runtime.ui);
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
