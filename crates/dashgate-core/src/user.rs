//! Users as supplied by the identity provider

use crate::serde_defaults::null_as_default;
use crate::{CompanyCode, GroupName, Role, Timestamp, UserId};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A fully resolved user record
///
/// `groups` keeps the order in which groups were assigned; the evaluator reports
/// the first matching group in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identity, immutable once issued
    pub uid: UserId,
    /// Contact address
    #[serde(default)]
    pub email: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Role within the application
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: Role,
    /// Company code the user belongs to
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: CompanyCode,
    /// Group memberships, in assignment order
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: IndexSet<GroupName>,
    /// Whether the account is enabled
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Creation stamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    /// Last update stamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

fn default_active() -> bool {
    true
}

impl User {
    /// Create an active user with no groups
    pub fn new(uid: impl Into<UserId>, role: Role, company: impl Into<CompanyCode>) -> Self {
        Self {
            uid: uid.into(),
            email: String::new(),
            name: String::new(),
            role,
            company: company.into(),
            groups: IndexSet::new(),
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    /// Add group memberships
    pub fn with_groups<I, G>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<GroupName>,
    {
        self.groups.extend(groups.into_iter().map(Into::into));
        self
    }

    /// True if the user has the admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// True if the user belongs to `group`
    pub fn in_group(&self, group: &GroupName) -> bool {
        self.groups.contains(group)
    }
}
