//! Tracing setup for the binary

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber filtered by `level`
///
/// `level` takes `EnvFilter` directive syntax, so `warn` and
/// `warn,dashgate_directory=debug` both work. Stdout stays reserved for command
/// output.
pub fn init(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level).map_err(|e| anyhow!("invalid log level '{level}': {e}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
