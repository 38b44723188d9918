//! Layered access-control data
//!
//! A dashboard carries two structures:
//!
//! - [`AccessControl`] holds grants. Layer 1 ([`DirectAccess`]) matches on user id,
//!   role or group and is OR-combined. Layer 2 (`company`) is keyed by company code
//!   and only applies to users of that company; within the entry, roles and groups
//!   are OR-combined.
//! - [`AccessRestrictions`] holds layer 3: explicit revocations and per-user expiry.
//!   Restrictions always override grants.
//!
//! Every collection defaults to empty, and `null` on the wire decodes as empty.
//! A `null` expiry means no expiry; a `null` company entry means no grant.
//! These types are data only; decisions are made by the evaluator in
//! `dashgate-authorization`.

use crate::serde_defaults::{lenient_roles, null_as_default, skip_null_values};
use crate::{CompanyCode, GroupName, Role, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Layer 1 grants: any single match grants access
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectAccess {
    /// Users granted by id
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: BTreeSet<UserId>,
    /// Roles granted
    #[serde(default, deserialize_with = "lenient_roles")]
    pub roles: BTreeSet<Role>,
    /// Groups granted
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: BTreeSet<GroupName>,
}

impl DirectAccess {
    /// True when no user, role or group is granted
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.roles.is_empty() && self.groups.is_empty()
    }
}

/// Layer 2 entry for one company: role or group must match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyGrant {
    /// Roles within the company that are granted
    #[serde(default, deserialize_with = "lenient_roles")]
    pub roles: BTreeSet<Role>,
    /// Groups within the company that are granted
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: BTreeSet<GroupName>,
}

impl CompanyGrant {
    /// True when the entry grants nothing
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty() && self.groups.is_empty()
    }
}

/// Grant layers of a dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessControl {
    /// Layer 1: direct grants
    #[serde(default, deserialize_with = "null_as_default")]
    pub direct: DirectAccess,
    /// Layer 2: company-scoped grants keyed by company code
    #[serde(default, deserialize_with = "skip_null_values")]
    pub company: BTreeMap<CompanyCode, CompanyGrant>,
}

impl AccessControl {
    /// Company entry for `code`, if any
    pub fn company_grant(&self, code: &CompanyCode) -> Option<&CompanyGrant> {
        self.company.get(code)
    }

    /// True when neither layer grants anything
    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.company.values().all(CompanyGrant::is_empty)
    }
}

/// Layer 3: explicit denials and time limits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRestrictions {
    /// Users explicitly denied, admins included
    #[serde(default, deserialize_with = "null_as_default")]
    pub revoke: BTreeSet<UserId>,
    /// Per-user instant after which access is no longer valid
    #[serde(default, deserialize_with = "skip_null_values")]
    pub expiry: BTreeMap<UserId, Timestamp>,
}

impl AccessRestrictions {
    /// True if `uid` is explicitly revoked
    pub fn is_revoked(&self, uid: &UserId) -> bool {
        self.revoke.contains(uid)
    }

    /// Expiry instant recorded for `uid`
    pub fn expiry_for(&self, uid: &UserId) -> Option<Timestamp> {
        self.expiry.get(uid).copied()
    }

    /// True once `now` is strictly past the expiry recorded for `uid`.
    ///
    /// Access remains valid at the expiry instant itself.
    pub fn is_expired(&self, uid: &UserId, now: Timestamp) -> bool {
        self.expiry_for(uid).is_some_and(|expiry| now > expiry)
    }
}
