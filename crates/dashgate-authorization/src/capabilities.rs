//! What a user may do with a dashboard they can see
//!
//! Owners and admins may edit, delete and quick-share; only admins manage the
//! full permission set. Capabilities are only handed out once the evaluator has
//! granted access.

use crate::decision::AccessDecision;
use crate::evaluator::AccessEvaluator;
use dashgate_core::{Dashboard, DashboardId, User};
use serde::{Deserialize, Serialize};

/// Actions available to a user on an accessible dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCapabilities {
    /// User created the dashboard
    pub is_owner: bool,
    /// May edit dashboard metadata
    pub can_edit: bool,
    /// May delete the dashboard
    pub can_delete: bool,
    /// May quick-share, revoke and set expiry
    pub can_share: bool,
    /// May replace the whole permission set
    pub can_manage_access: bool,
}

impl DashboardCapabilities {
    /// Capabilities from ownership and role alone, without an access check
    pub fn derive(user: &User, dashboard: &Dashboard) -> Self {
        let is_owner = dashboard.is_owned_by(&user.uid);
        let owner_or_admin = is_owner || user.is_admin();
        Self {
            is_owner,
            can_edit: owner_or_admin,
            can_delete: owner_or_admin,
            can_share: owner_or_admin,
            can_manage_access: user.is_admin(),
        }
    }

    /// Capabilities for `user`, or `None` if the evaluator denies access
    pub fn for_user(
        evaluator: &AccessEvaluator,
        user: &User,
        dashboard: &Dashboard,
    ) -> Option<Self> {
        evaluator
            .can_access(user, dashboard)
            .then(|| Self::derive(user, dashboard))
    }
}

/// Dashboard as presented to one user: decision plus capabilities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCard {
    /// Dashboard shown
    pub dashboard_id: DashboardId,
    /// Display name
    pub name: String,
    /// How access was granted
    pub access: AccessDecision,
    /// What the user may do
    pub capabilities: DashboardCapabilities,
}

impl DashboardCard {
    /// Build the card, or `None` when `user` cannot access `dashboard`
    pub fn build(evaluator: &AccessEvaluator, user: &User, dashboard: &Dashboard) -> Option<Self> {
        let access = evaluator.access_reason(user, dashboard);
        if !access.has_access {
            return None;
        }
        Some(Self {
            dashboard_id: dashboard.id.clone(),
            name: dashboard.name.clone(),
            access,
            capabilities: DashboardCapabilities::derive(user, dashboard),
        })
    }
}
