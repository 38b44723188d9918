//! CLI configuration
//!
//! Resolved in layers, later ones winning: built-in defaults, the TOML config
//! file, `DASHGATE_*` environment variables, command-line flags.

use crate::cli::GlobalArgs;
use dashgate_core::{DashgateError, Result, Timestamp};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding `data_dir`
pub const ENV_DATA_DIR: &str = "DASHGATE_DATA_DIR";
/// Environment variable overriding `log_level`
pub const ENV_LOG_LEVEL: &str = "DASHGATE_LOG_LEVEL";
/// Environment variable overriding `evaluate_at`
pub const ENV_EVALUATE_AT: &str = "DASHGATE_EVALUATE_AT";

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Settings for one CLI invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Directory holding the snapshot files
    pub data_dir: PathBuf,
    /// Log level filter, e.g. `warn` or `dashgate_directory=debug`
    pub log_level: String,
    /// Fixed evaluation instant; the system clock when unset
    pub evaluate_at: Option<Timestamp>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            log_level: "warn".to_string(),
            evaluate_at: None,
        }
    }
}

impl CliConfig {
    /// Resolve the configuration for `args`: file, then environment, then flags
    pub fn resolve(args: &GlobalArgs) -> Result<Self> {
        let mut config = Self::load_from_file(&args.config)?;
        config.merge_with_env()?;
        config.apply_args(args);
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file; a missing file yields the defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            DashgateError::storage(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        toml::from_str(&contents).map_err(|e| {
            DashgateError::invalid(format!("Failed to parse config file {}: {}", path.display(), e))
        })
    }

    /// Apply `DASHGATE_*` environment variables
    pub fn merge_with_env(&mut self) -> Result<()> {
        self.merge_with_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name
    pub fn merge_with_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(at) = lookup(ENV_EVALUATE_AT) {
            let at = at.parse::<Timestamp>().map_err(|e| {
                DashgateError::invalid(format!("{ENV_EVALUATE_AT} is not an RFC 3339 instant: {e}"))
            })?;
            self.evaluate_at = Some(at);
        }
        Ok(())
    }

    /// Apply command-line flags
    pub fn apply_args(&mut self, args: &GlobalArgs) {
        if let Some(dir) = &args.data {
            self.data_dir.clone_from(dir);
        }
        if let Some(at) = args.at {
            self.evaluate_at = Some(at);
        }
        if args.verbose {
            self.log_level = "debug".to_string();
        }
    }

    /// Check the resolved settings
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(DashgateError::invalid("data_dir cannot be empty"));
        }

        for directive in self.log_level.split(',').map(str::trim) {
            if !is_valid_directive(directive) {
                return Err(DashgateError::invalid(format!(
                    "unrecognised log level '{}'",
                    self.log_level
                )));
            }
        }
        Ok(())
    }
}

/// A bare level, a bare target, or `target=level`
fn is_valid_directive(directive: &str) -> bool {
    match directive.split_once('=') {
        Some((target, level)) => {
            let level = level.trim().to_ascii_lowercase();
            is_target(target.trim()) && LOG_LEVELS.contains(&level.as_str())
        }
        None => is_target(directive),
    }
}

/// Module path such as `dashgate_directory::snapshot`; bare levels also match
fn is_target(target: &str) -> bool {
    target.split("::").all(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    })
}
