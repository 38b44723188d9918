//! Access decisions and their provenance

use dashgate_core::{CompanyCode, DashgateError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why access was granted or denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessReason {
    /// The user is in `restrictions.revoke`
    Revoked,
    /// The user's expiry instant has passed
    Expired,
    /// Admin role; grant layers not consulted
    Admin,
    /// Dashboard is archived and the user is not an admin
    Archived,
    /// Matched a layer 1 grant
    #[serde(rename = "layer1_direct")]
    Layer1Direct,
    /// Matched a layer 2 grant for the user's company
    #[serde(rename = "layer2_company")]
    Layer2Company,
    /// Nothing matched
    NoMatch,
}

impl AccessReason {
    /// Wire name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessReason::Revoked => "revoked",
            AccessReason::Expired => "expired",
            AccessReason::Admin => "admin",
            AccessReason::Archived => "archived",
            AccessReason::Layer1Direct => "layer1_direct",
            AccessReason::Layer2Company => "layer2_company",
            AccessReason::NoMatch => "no_match",
        }
    }

    /// True for reasons that grant access
    pub fn grants_access(&self) -> bool {
        matches!(
            self,
            AccessReason::Admin | AccessReason::Layer1Direct | AccessReason::Layer2Company
        )
    }
}

impl fmt::Display for AccessReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grant layer that matched. Serialized as `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum GrantLayer {
    /// Layer 1
    Direct,
    /// Layer 2
    Company,
}

impl From<GrantLayer> for u8 {
    fn from(layer: GrantLayer) -> Self {
        match layer {
            GrantLayer::Direct => 1,
            GrantLayer::Company => 2,
        }
    }
}

impl TryFrom<u8> for GrantLayer {
    type Error = DashgateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(GrantLayer::Direct),
            2 => Ok(GrantLayer::Company),
            other => Err(DashgateError::invalid(format!(
                "grant layer must be 1 or 2, got {other}"
            ))),
        }
    }
}

/// What kind of grant entry matched
///
/// Variants are declared in reporting priority: when several entries of one
/// layer match, the earliest kind wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrantKind {
    /// Matched by user id
    User,
    /// Matched by role
    Role,
    /// Matched by group membership
    Group,
}

impl fmt::Display for GrantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GrantKind::User => "user",
            GrantKind::Role => "role",
            GrantKind::Group => "group",
        })
    }
}

/// The grant entry responsible for allowing access
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantedBy {
    /// Layer of the matching entry
    pub layer: GrantLayer,
    /// Kind of the matching entry
    #[serde(rename = "type")]
    pub kind: GrantKind,
    /// Matched user id, role name or group name
    pub name: String,
    /// Company entry that matched, for layer 2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyCode>,
}

impl GrantedBy {
    /// Layer 1 provenance
    pub fn direct(kind: GrantKind, name: impl Into<String>) -> Self {
        Self {
            layer: GrantLayer::Direct,
            kind,
            name: name.into(),
            company: None,
        }
    }

    /// Layer 2 provenance within `company`
    pub fn company(kind: GrantKind, name: impl Into<String>, company: CompanyCode) -> Self {
        Self {
            layer: GrantLayer::Company,
            kind,
            name: name.into(),
            company: Some(company),
        }
    }
}

impl fmt::Display for GrantedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.company {
            Some(company) => write!(f, "{} {} (in {})", self.kind, self.name, company),
            None => write!(f, "{} {}", self.kind, self.name),
        }
    }
}

/// Outcome of evaluating one user against one dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessDecision {
    /// Whether access is granted
    pub has_access: bool,
    /// Why
    pub reason: AccessReason,
    /// Matching grant entry, present for layer 1 and layer 2 grants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granted_by: Option<GrantedBy>,
}

impl AccessDecision {
    /// Denied for `reason`
    pub fn deny(reason: AccessReason) -> Self {
        Self {
            has_access: false,
            reason,
            granted_by: None,
        }
    }

    /// Allowed through the admin bypass
    pub fn admin() -> Self {
        Self {
            has_access: true,
            reason: AccessReason::Admin,
            granted_by: None,
        }
    }

    /// Allowed by a grant entry
    pub fn granted(granted_by: GrantedBy) -> Self {
        let reason = match granted_by.layer {
            GrantLayer::Direct => AccessReason::Layer1Direct,
            GrantLayer::Company => AccessReason::Layer2Company,
        };
        Self {
            has_access: true,
            reason,
            granted_by: Some(granted_by),
        }
    }
}

impl fmt::Display for AccessDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.has_access { "allowed" } else { "denied" };
        match &self.granted_by {
            Some(granted_by) => write!(f, "{verdict} ({}: {granted_by})", self.reason),
            None => write!(f, "{verdict} ({})", self.reason),
        }
    }
}
