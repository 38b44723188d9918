//! Dashgate CLI - dashboard access checks from the command line
//!
//! Loads a directory snapshot (`users.json`, `dashboards.json`,
//! `folders.json`) and answers access questions against it. The binary in
//! `main.rs` only parses arguments, sets up logging and maps the outcome to an
//! exit status; everything else lives here so it can be driven from tests.

#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

pub use cli::{Cli, Command, GlobalArgs, Target};
pub use commands::Outcome;
pub use config::CliConfig;

use anyhow::{Context, Result};
use dashgate_authorization::AccessEvaluator;
use dashgate_core::SystemClock;
use dashgate_directory::{AccessService, InMemoryDirectory, Snapshot};
use std::io::Write;

/// Load the snapshot named by `config` and run `command` against it
pub fn run(command: &Command, config: &CliConfig, out: &mut dyn Write) -> Result<Outcome> {
    let snapshot = Snapshot::load_dir(&config.data_dir)
        .with_context(|| format!("loading snapshot from {}", config.data_dir.display()))?;

    let evaluator = match config.evaluate_at {
        Some(at) => AccessEvaluator::at(at),
        None => AccessEvaluator::from_clock(&SystemClock),
    };
    tracing::debug!(at = %evaluator.evaluated_at(), "evaluating access");

    let service = AccessService::new(InMemoryDirectory::from(snapshot), evaluator);
    commands::execute(command, &service, out)
}
