//! User roles

use crate::DashgateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a user within the application
///
/// Roles are ordered by privilege, so `Role::Admin > Role::User`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular dashboard viewer
    #[default]
    User,
    /// Folder moderator
    Moderator,
    /// Administrator; bypasses archival and grant checks, never revocation
    Admin,
}

impl Role {
    /// All roles in privilege order
    pub const ALL: [Role; 3] = [Role::User, Role::Moderator, Role::Admin];

    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
        }
    }

    /// True for [`Role::Admin`]
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DashgateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "moderator" => Ok(Role::Moderator),
            "admin" => Ok(Role::Admin),
            other => Err(DashgateError::invalid(format!("unknown role: {other}"))),
        }
    }
}
