//! Dashgate CLI
//!
//! Answers dashboard access questions against a directory snapshot.

use clap::Parser;
use dashgate_cli::{logging, run, Cli, CliConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CliConfig::resolve(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    if let Err(e) = logging::init(&config.log_level) {
        eprintln!("error: {e:#}");
        return ExitCode::from(2);
    }

    let mut stdout = std::io::stdout().lock();
    match run(&cli.command, &config, &mut stdout) {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
