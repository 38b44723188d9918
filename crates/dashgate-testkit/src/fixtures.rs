//! Shared test data
//!
//! A small organisation with two companies, a folder tree and dashboards that
//! exercise every access layer. Everything is pinned to [`reference_now`].

use crate::builders::{user, DashboardBuilder};
use chrono::{Duration, TimeZone, Utc};
use dashgate_core::{Dashboard, Folder, FolderId, Role, Timestamp, User};
use std::io;
use std::path::Path;

/// Fixed instant all fixtures are relative to
pub fn reference_now() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Users of the sample organisation, in directory order
pub fn sample_users() -> Vec<User> {
    vec![
        user("u-admin", Role::Admin, "STTH", &[]),
        user("u-owner", Role::User, "STTH", &["analytics"]),
        user("u-sales", Role::User, "STTN", &["sales"]),
        user("u-stth", Role::User, "STTH", &[]),
        user("u-mod", Role::Moderator, "STTN", &["ops"]),
        user("u-guest", Role::User, "EXT", &[]),
        user("u-leaver", Role::User, "STTH", &["sales"]),
    ]
}

/// Folder tree: `root` → `sales` → `sales-emea`, plus an empty `hr` root
pub fn sample_folders() -> Vec<Folder> {
    vec![
        Folder::new("root", "Company", None),
        Folder::new("sales", "Sales", Some(FolderId::from("root"))),
        Folder::new("sales-emea", "Sales EMEA", Some(FolderId::from("sales"))),
        Folder::new("hr", "HR", None),
    ]
}

/// Dashboards spread over the folder tree
pub fn sample_dashboards() -> Vec<Dashboard> {
    let now = reference_now();
    vec![
        DashboardBuilder::new("d-overview")
            .named("Company overview")
            .in_folder("root")
            .owned_by("u-owner")
            .grant_company_role("STTH", Role::User)
            .revoke("u-leaver")
            .build(),
        DashboardBuilder::new("d-pipeline")
            .named("Sales pipeline")
            .in_folder("sales-emea")
            .owned_by("u-owner")
            .grant_group("sales")
            .grant_user("u-guest")
            .expire("u-guest", now + Duration::days(30))
            .build(),
        DashboardBuilder::new("d-old")
            .named("Retired KPIs")
            .in_folder("sales")
            .owned_by("u-owner")
            .grant_role(Role::User)
            .archived()
            .build(),
        DashboardBuilder::new("d-ops")
            .named("Operations")
            .in_folder("hr")
            .owned_by("u-mod")
            .grant_company_group("STTN", "ops")
            .expired_for("u-guest", now)
            .grant_user("u-guest")
            .build(),
    ]
}

/// Write the sample organisation as `users.json`, `dashboards.json` and
/// `folders.json` under `dir`
pub fn write_sample_snapshot(dir: &Path) -> io::Result<()> {
    write_json(&dir.join("users.json"), &sample_users())?;
    write_json(&dir.join("dashboards.json"), &sample_dashboards())?;
    write_json(&dir.join("folders.json"), &sample_folders())
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    std::fs::write(path, json)
}
