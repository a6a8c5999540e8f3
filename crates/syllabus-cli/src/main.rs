//! Syllabus CLI
//!
//! Main entry point for the `syllabus` binary.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use syllabus_cli::cli::Cli;
use syllabus_common_config::Environment;
use syllabus_common_log::{LogConfig, LogLevel};

fn main() -> ExitCode {
    // Load .env before clap reads env-backed arguments
    let _env = Environment::init();

    let cli = Cli::parse();
    init_tracing(&cli);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start the async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(cli.execute()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = e.code(), "{e}");
            eprintln!("error[{}]: {e}", e.code());
            if let Some(hint) = e.hint() {
                eprintln!("  hint: {hint}");
            }
            for suggestion in e.suggestions() {
                eprintln!("  - {suggestion}");
            }
            e.exit_code()
        }
    }
}

fn init_tracing(cli: &Cli) {
    let config =
        LogConfig::from_env().with_level(LogLevel::from_verbosity(cli.verbose, cli.quiet));
    if let Err(e) = syllabus_common_log::init(config) {
        eprintln!("warning: {e}");
    }
}
