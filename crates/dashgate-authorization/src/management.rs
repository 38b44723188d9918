//! Permission management
//!
//! The only sanctioned way to mutate a dashboard's `access` and `restrictions`.
//! Owners and admins may quick-share, revoke, restore and set expiry; only admins
//! may replace the whole permission set. Every successful change yields a
//! [`PermissionChange`] suitable for an audit trail.
//!
//! Mutations never weaken restrictions implicitly: sharing with a revoked user
//! adds the grant but leaves the revocation in place.

use dashgate_core::{
    AccessControl, AccessRestrictions, Dashboard, DashboardId, DashgateError, Result, Timestamp,
    User, UserId,
};
use serde::{Deserialize, Serialize};

/// Kind of permission change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionAction {
    /// Grants were added or a restriction lifted
    PermissionAdded,
    /// Grants were removed or a restriction imposed
    PermissionRemoved,
    /// The configuration was replaced or adjusted
    PermissionModified,
}

/// Audit record of one permission change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionChange {
    /// What happened
    pub action: PermissionAction,
    /// Dashboard changed
    pub dashboard_id: DashboardId,
    /// Acting user
    pub changed_by: UserId,
    /// When
    pub changed_at: Timestamp,
    /// Human-readable summary
    pub description: String,
}

/// Full replacement of a dashboard's permission configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePermissions {
    /// New grant layers
    #[serde(default)]
    pub access: AccessControl,
    /// New restrictions
    #[serde(default)]
    pub restrictions: AccessRestrictions,
}

/// Applies permission changes on behalf of one acting user
#[derive(Debug, Clone, Copy)]
pub struct PermissionEditor<'a> {
    actor: &'a User,
    now: Timestamp,
}

impl<'a> PermissionEditor<'a> {
    /// Editor acting as `actor`, stamping changes with `now`
    pub fn new(actor: &'a User, now: Timestamp) -> Self {
        Self { actor, now }
    }

    /// Add `users` to the direct user grants, optionally with an expiry
    pub fn quick_share(
        &self,
        dashboard: &mut Dashboard,
        users: &[UserId],
        expiry: Option<Timestamp>,
    ) -> Result<PermissionChange> {
        self.ensure_owner_or_admin(dashboard, "share")?;
        if users.is_empty() {
            return Err(DashgateError::invalid("quick share needs at least one user"));
        }
        if let Some(expiry) = expiry {
            self.ensure_future(expiry)?;
        }

        let mut added = 0usize;
        for uid in users {
            if dashboard.access.direct.users.insert(uid.clone()) {
                added += 1;
            }
            if let Some(expiry) = expiry {
                dashboard.restrictions.expiry.insert(uid.clone(), expiry);
            }
            if dashboard.restrictions.is_revoked(uid) {
                tracing::warn!(
                    dashboard = %dashboard.id,
                    uid = %uid,
                    "shared with a revoked user; revocation still applies"
                );
            }
        }

        let description = match expiry {
            Some(expiry) => format!(
                "Shared with {} user(s) until {}",
                users.len(),
                expiry.to_rfc3339()
            ),
            None => format!("Shared with {} user(s)", users.len()),
        };
        tracing::info!(dashboard = %dashboard.id, actor = %self.actor.uid, added, "quick share");
        Ok(self.record(dashboard, PermissionAction::PermissionAdded, description))
    }

    /// Remove `uid` from the direct user grants and clear its expiry
    pub fn remove_direct_access(
        &self,
        dashboard: &mut Dashboard,
        uid: &UserId,
    ) -> Result<PermissionChange> {
        self.ensure_owner_or_admin(dashboard, "remove access from")?;
        let removed = dashboard.access.direct.users.remove(uid);
        let cleared = dashboard.restrictions.expiry.remove(uid).is_some();
        if !removed && !cleared {
            return Err(DashgateError::not_found(format!(
                "{uid} has no direct access to {}",
                dashboard.id
            )));
        }
        Ok(self.record(
            dashboard,
            PermissionAction::PermissionRemoved,
            format!("Removed direct access for {uid}"),
        ))
    }

    /// Explicitly deny `uid`, overriding every grant
    pub fn revoke(&self, dashboard: &mut Dashboard, uid: &UserId) -> Result<PermissionChange> {
        self.ensure_owner_or_admin(dashboard, "revoke on")?;
        if !dashboard.restrictions.revoke.insert(uid.clone()) {
            return Err(DashgateError::invalid(format!(
                "{uid} is already revoked on {}",
                dashboard.id
            )));
        }
        tracing::info!(dashboard = %dashboard.id, actor = %self.actor.uid, uid = %uid, "revoked");
        Ok(self.record(
            dashboard,
            PermissionAction::PermissionRemoved,
            format!("Revoked access for {uid}"),
        ))
    }

    /// Lift an explicit revocation
    pub fn restore(&self, dashboard: &mut Dashboard, uid: &UserId) -> Result<PermissionChange> {
        self.ensure_owner_or_admin(dashboard, "restore on")?;
        if !dashboard.restrictions.revoke.remove(uid) {
            return Err(DashgateError::not_found(format!(
                "{uid} is not revoked on {}",
                dashboard.id
            )));
        }
        Ok(self.record(
            dashboard,
            PermissionAction::PermissionAdded,
            format!("Restored access for {uid}"),
        ))
    }

    /// Set or clear the expiry for `uid`
    pub fn set_expiry(
        &self,
        dashboard: &mut Dashboard,
        uid: &UserId,
        expiry: Option<Timestamp>,
    ) -> Result<PermissionChange> {
        self.ensure_owner_or_admin(dashboard, "set expiry on")?;
        let description = match expiry {
            Some(expiry) => {
                self.ensure_future(expiry)?;
                dashboard.restrictions.expiry.insert(uid.clone(), expiry);
                format!("Access for {uid} expires {}", expiry.to_rfc3339())
            }
            None => {
                dashboard.restrictions.expiry.remove(uid);
                format!("Cleared expiry for {uid}")
            }
        };
        Ok(self.record(dashboard, PermissionAction::PermissionModified, description))
    }

    /// Replace `access` and `restrictions` wholesale. Admin only.
    pub fn save_permissions(
        &self,
        dashboard: &mut Dashboard,
        permissions: SavePermissions,
    ) -> Result<PermissionChange> {
        if !self.actor.is_admin() {
            return Err(DashgateError::permission_denied(format!(
                "only admins may manage permissions of {}",
                dashboard.id
            )));
        }
        dashboard.access = permissions.access;
        dashboard.restrictions = permissions.restrictions;
        tracing::info!(dashboard = %dashboard.id, actor = %self.actor.uid, "saved permissions");
        Ok(self.record(
            dashboard,
            PermissionAction::PermissionModified,
            "Permissions saved".to_string(),
        ))
    }

    fn ensure_owner_or_admin(&self, dashboard: &Dashboard, verb: &str) -> Result<()> {
        if self.actor.is_admin() || dashboard.is_owned_by(&self.actor.uid) {
            Ok(())
        } else {
            Err(DashgateError::permission_denied(format!(
                "{} may not {verb} {}",
                self.actor.uid, dashboard.id
            )))
        }
    }

    fn ensure_future(&self, expiry: Timestamp) -> Result<()> {
        if expiry <= self.now {
            return Err(DashgateError::invalid(format!(
                "expiry {} is not in the future",
                expiry.to_rfc3339()
            )));
        }
        Ok(())
    }

    fn record(
        &self,
        dashboard: &mut Dashboard,
        action: PermissionAction,
        description: String,
    ) -> PermissionChange {
        dashboard.updated_at = Some(self.now);
        dashboard.updated_by = Some(self.actor.uid.clone());
        PermissionChange {
            action,
            dashboard_id: dashboard.id.clone(),
            changed_by: self.actor.uid.clone(),
            changed_at: self.now,
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::AccessEvaluator;
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};
    use dashgate_core::Role;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn owner() -> User {
        User::new("owner", Role::User, "STTH")
    }

    #[test]
    fn owner_quick_share_grants_until_expiry() {
        let owner = owner();
        let guest = User::new("guest", Role::User, "STTN");
        let mut dashboard = Dashboard::new("d1", "f1", "owner");
        let expiry = now() + Duration::days(7);

        let change = PermissionEditor::new(&owner, now())
            .quick_share(&mut dashboard, &[guest.uid.clone()], Some(expiry))
            .unwrap();

        assert_eq!(change.action, PermissionAction::PermissionAdded);
        assert_eq!(dashboard.updated_by.as_ref(), Some(&owner.uid));
        assert!(AccessEvaluator::at(now()).can_access(&guest, &dashboard));
        assert!(!AccessEvaluator::at(expiry + Duration::seconds(1)).can_access(&guest, &dashboard));
    }

    #[test]
    fn quick_share_does_not_duplicate_users() {
        let owner = owner();
        let mut dashboard = Dashboard::new("d1", "f1", "owner");
        let editor = PermissionEditor::new(&owner, now());
        let guest = UserId::from("guest");

        editor.quick_share(&mut dashboard, &[guest.clone()], None).unwrap();
        editor.quick_share(&mut dashboard, &[guest.clone(), guest], None).unwrap();
        assert_eq!(dashboard.access.direct.users.len(), 1);
    }

    #[test]
    fn quick_share_rejects_past_expiry_and_empty_list() {
        let owner = owner();
        let mut dashboard = Dashboard::new("d1", "f1", "owner");
        let editor = PermissionEditor::new(&owner, now());

        assert_matches!(
            editor.quick_share(&mut dashboard, &[UserId::from("g")], Some(now())),
            Err(DashgateError::Invalid { .. })
        );
        assert_matches!(
            editor.quick_share(&mut dashboard, &[], None),
            Err(DashgateError::Invalid { .. })
        );
        assert!(dashboard.access.direct.users.is_empty());
    }

    #[test]
    fn sharing_keeps_revocation() {
        let owner = owner();
        let guest = User::new("guest", Role::User, "STTN");
        let mut dashboard = Dashboard::new("d1", "f1", "owner");
        dashboard.restrictions.revoke.insert(guest.uid.clone());

        PermissionEditor::new(&owner, now())
            .quick_share(&mut dashboard, &[guest.uid.clone()], None)
            .unwrap();
        assert!(!AccessEvaluator::at(now()).can_access(&guest, &dashboard));
    }

    #[test]
    fn stranger_cannot_share_or_revoke() {
        let stranger = User::new("stranger", Role::Moderator, "STTH");
        let mut dashboard = Dashboard::new("d1", "f1", "owner");
        let editor = PermissionEditor::new(&stranger, now());

        assert_matches!(
            editor.quick_share(&mut dashboard, &[UserId::from("x")], None),
            Err(DashgateError::PermissionDenied { .. })
        );
        assert_matches!(
            editor.revoke(&mut dashboard, &UserId::from("x")),
            Err(DashgateError::PermissionDenied { .. })
        );
    }

    #[test]
    fn revoke_then_restore() {
        let admin = User::new("admin", Role::Admin, "STTH");
        let target = User::new("u1", Role::User, "STTH");
        let mut dashboard = Dashboard::new("d1", "f1", "owner");
        dashboard.access.direct.roles.insert(Role::User);
        let editor = PermissionEditor::new(&admin, now());
        let evaluator = AccessEvaluator::at(now());

        editor.revoke(&mut dashboard, &target.uid).unwrap();
        assert!(!evaluator.can_access(&target, &dashboard));
        assert_matches!(
            editor.revoke(&mut dashboard, &target.uid),
            Err(DashgateError::Invalid { .. })
        );

        editor.restore(&mut dashboard, &target.uid).unwrap();
        assert!(evaluator.can_access(&target, &dashboard));
        assert_matches!(
            editor.restore(&mut dashboard, &target.uid),
            Err(DashgateError::NotFound { .. })
        );
    }

    #[test]
    fn remove_direct_access_clears_expiry() {
        let owner = owner();
        let mut dashboard = Dashboard::new("d1", "f1", "owner");
        let editor = PermissionEditor::new(&owner, now());
        let guest = UserId::from("guest");

        editor
            .quick_share(&mut dashboard, &[guest.clone()], Some(now() + Duration::days(1)))
            .unwrap();
        let change = editor.remove_direct_access(&mut dashboard, &guest).unwrap();

        assert_eq!(change.action, PermissionAction::PermissionRemoved);
        assert!(dashboard.access.direct.users.is_empty());
        assert!(dashboard.restrictions.expiry.is_empty());
        assert!(editor.remove_direct_access(&mut dashboard, &guest).unwrap_err().is_not_found());
    }

    #[test]
    fn set_and_clear_expiry() {
        let owner = owner();
        let mut dashboard = Dashboard::new("d1", "f1", "owner");
        let editor = PermissionEditor::new(&owner, now());
        let guest = UserId::from("guest");

        editor
            .set_expiry(&mut dashboard, &guest, Some(now() + Duration::hours(2)))
            .unwrap();
        assert!(dashboard.restrictions.expiry_for(&guest).is_some());

        editor.set_expiry(&mut dashboard, &guest, None).unwrap();
        assert!(dashboard.restrictions.expiry_for(&guest).is_none());
    }

    #[test]
    fn only_admin_saves_full_permissions() {
        let owner = owner();
        let admin = User::new("admin", Role::Admin, "STTH");
        let mut dashboard = Dashboard::new("d1", "f1", "owner");
        let mut permissions = SavePermissions::default();
        permissions.access.direct.roles.insert(Role::Moderator);

        assert_matches!(
            PermissionEditor::new(&owner, now()).save_permissions(&mut dashboard, permissions.clone()),
            Err(DashgateError::PermissionDenied { .. })
        );

        let change = PermissionEditor::new(&admin, now())
            .save_permissions(&mut dashboard, permissions)
            .unwrap();
        assert_eq!(change.action, PermissionAction::PermissionModified);
        assert!(dashboard.access.direct.roles.contains(&Role::Moderator));
        assert_eq!(dashboard.updated_at, Some(now()));
    }

    #[test]
    fn change_serializes_like_audit_entry() {
        let change = PermissionChange {
            action: PermissionAction::PermissionAdded,
            dashboard_id: DashboardId::from("d1"),
            changed_by: UserId::from("owner"),
            changed_at: now(),
            description: "Shared with 1 user(s)".to_string(),
        };
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["action"], "permission_added");
        assert_eq!(json["dashboardId"], "d1");
        assert_eq!(json["changedBy"], "owner");
    }
}
