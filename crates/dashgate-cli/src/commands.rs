//! Subcommand handlers
//!
//! Each handler writes plain text (or JSON where asked) to `out` and reports
//! whether the question was answered positively.

use crate::cli::{Command, Target};
use anyhow::Result;
use dashgate_core::{DashboardId, FolderId, UserId};
use dashgate_directory::{AccessService, Directory};
use std::io::Write;
use std::process::ExitCode;

/// How a command ended, mapped to the process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Answered, or access allowed
    Success,
    /// Access denied
    Denied,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Denied => ExitCode::from(1),
        }
    }
}

/// Run `command` against `service`
pub fn execute<D: Directory>(
    command: &Command,
    service: &AccessService<D>,
    out: &mut dyn Write,
) -> Result<Outcome> {
    match command {
        Command::Check(target) => check(service, target, out),
        Command::Explain { target, json } => explain(service, target, *json, out),
        Command::List { user, folder } => list(service, user, folder.as_ref(), out),
        Command::Who { dashboard } => who(service, dashboard, out),
        Command::Card(target) => card(service, target, out),
        Command::Folders { user } => folders(service, user, out),
    }
}

fn check<D: Directory>(service: &AccessService<D>, target: &Target, out: &mut dyn Write) -> Result<Outcome> {
    let allowed = service.can_access_dashboard(&target.dashboard, &target.user)?;
    writeln!(out, "{}", if allowed { "allowed" } else { "denied" })?;
    Ok(verdict(allowed))
}

fn explain<D: Directory>(
    service: &AccessService<D>,
    target: &Target,
    json: bool,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let decision = service.access_reason(&target.dashboard, &target.user)?;
    if json {
        serde_json::to_writer_pretty(&mut *out, &decision)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{decision}")?;
    }
    Ok(verdict(decision.has_access))
}

fn list<D: Directory>(
    service: &AccessService<D>,
    user: &UserId,
    folder: Option<&FolderId>,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let dashboards = match folder {
        Some(folder) => service.dashboards_in_folder(folder, user)?,
        None => service.accessible_dashboards(user)?,
    };
    for dashboard in dashboards {
        writeln!(out, "{}\t{}", dashboard.id, dashboard.name)?;
    }
    Ok(Outcome::Success)
}

fn who<D: Directory>(service: &AccessService<D>, dashboard: &DashboardId, out: &mut dyn Write) -> Result<Outcome> {
    for uid in service.accessible_users(dashboard)? {
        writeln!(out, "{uid}")?;
    }
    Ok(Outcome::Success)
}

fn card<D: Directory>(service: &AccessService<D>, target: &Target, out: &mut dyn Write) -> Result<Outcome> {
    match service.dashboard_card(&target.dashboard, &target.user)? {
        Some(card) => {
            serde_json::to_writer_pretty(&mut *out, &card)?;
            writeln!(out)?;
            Ok(Outcome::Success)
        }
        None => {
            writeln!(out, "denied")?;
            Ok(Outcome::Denied)
        }
    }
}

fn folders<D: Directory>(service: &AccessService<D>, user: &UserId, out: &mut dyn Write) -> Result<Outcome> {
    for visible in service.visible_folders(user)? {
        writeln!(
            out,
            "{}\t{}\t{}",
            visible.folder.id,
            visible.path.join(" / "),
            visible.accessible_dashboards
        )?;
    }
    Ok(Outcome::Success)
}

fn verdict(allowed: bool) -> Outcome {
    if allowed {
        Outcome::Success
    } else {
        Outcome::Denied
    }
}
