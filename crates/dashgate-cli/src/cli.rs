//! Command-line arguments

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use dashgate_core::{DashboardId, FolderId, UserId};
use std::path::PathBuf;

/// Dashboard access checks over a directory snapshot
#[derive(Debug, Parser)]
#[command(name = "dashgate", version)]
#[command(about = "Dashgate - dashboard access checks over a directory snapshot", long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Global flags
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Flags accepted by every subcommand
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, default_value = "dashgate.toml")]
    pub config: PathBuf,

    /// Snapshot directory, overrides the config file
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Evaluate expiries at this RFC 3339 instant instead of now
    #[arg(long, global = true)]
    pub at: Option<DateTime<Utc>>,
}

/// Access questions
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print `allowed` or `denied`; exit status 1 when denied
    Check(Target),

    /// Explain why access is allowed or denied
    Explain {
        /// User and dashboard
        #[command(flatten)]
        target: Target,

        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },

    /// List dashboards a user can access
    List {
        /// User id
        #[arg(short, long)]
        user: UserId,

        /// Only dashboards directly in this folder
        #[arg(short, long)]
        folder: Option<FolderId>,
    },

    /// List users who can access a dashboard
    Who {
        /// Dashboard id
        #[arg(short, long)]
        dashboard: DashboardId,
    },

    /// Show what a user may do with a dashboard
    Card(Target),

    /// List folders visible in a user's sidebar
    Folders {
        /// User id
        #[arg(short, long)]
        user: UserId,
    },
}

/// One user and one dashboard
#[derive(Debug, Clone, Args)]
pub struct Target {
    /// User id
    #[arg(short, long)]
    pub user: UserId,

    /// Dashboard id
    #[arg(short, long)]
    pub dashboard: DashboardId,
}
