//! Dashgate Core - data model for dashboard sharing
//!
//! This crate holds the types every other dashgate crate speaks: identifiers,
//! roles, users, dashboards, folders and the three-layer access configuration
//! attached to each dashboard. It contains no decision logic.
//!
//! # Access layers
//!
//! - **Layer 1, direct**: user id, role or group grants, OR-combined
//! - **Layer 2, company**: grants that also require the user's company to match
//! - **Layer 3, restrictions**: revocation and expiry, which override both grant layers
//!
//! Absent or `null` collections always decode as empty so partially populated
//! records never fail to load.

#![forbid(unsafe_code)]

/// Layered grant and restriction types
pub mod access;

/// Dashboards and folders
pub mod dashboard;

/// Unified error handling
pub mod errors;

/// String identifiers
pub mod identifiers;

/// User roles
pub mod role;

/// Lenient deserialization helpers
pub mod serde_defaults;

/// Time source abstraction
pub mod time;

/// Users
pub mod user;

pub use access::{AccessControl, AccessRestrictions, CompanyGrant, DirectAccess};
pub use dashboard::{Dashboard, DashboardType, Folder};
pub use errors::{DashgateError, Result};
pub use identifiers::{CompanyCode, DashboardId, FolderId, GroupName, UserId};
pub use role::Role;
pub use time::{Clock, FixedClock, SystemClock, Timestamp};
pub use user::User;
