//! Dashboard access evaluation
//!
//! [`AccessEvaluator`] is the single decision function for "may this user see
//! this dashboard". Every call site (directory services, capability checks,
//! folder visibility, the CLI) delegates here rather than re-implementing the
//! rules.
//!
//! Evaluation order:
//!
//! 1. revoked → deny, admins included
//! 2. admin → allow, archived dashboards included
//! 3. archived → deny
//! 4. expired (`now > expiry`) → deny
//! 5. layer 1 direct grant (user, role, group) → allow
//! 6. layer 2 grant for the user's own company (role, group) → allow
//! 7. deny
//!
//! The evaluator is a pure function of `(user, dashboard, now)`. It performs no
//! lookups, holds no mutable state and is safe to share across threads.

use crate::decision::{AccessDecision, AccessReason, GrantKind, GrantedBy};
use dashgate_core::{Clock, Dashboard, DirectAccess, User, UserId, Timestamp};
use std::collections::BTreeSet;

/// Decides dashboard access at a fixed instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessEvaluator {
    now: Timestamp,
}

impl AccessEvaluator {
    /// Evaluator whose expiry checks compare against `now`
    pub fn at(now: Timestamp) -> Self {
        Self { now }
    }

    /// Evaluator pinned to the clock's current instant
    pub fn from_clock(clock: &impl Clock) -> Self {
        Self::at(clock.now())
    }

    /// Instant used for expiry checks
    pub fn evaluated_at(&self) -> Timestamp {
        self.now
    }

    /// Whether `user` may access `dashboard`
    pub fn can_access(&self, user: &User, dashboard: &Dashboard) -> bool {
        self.access_reason(user, dashboard).has_access
    }

    /// Decision with provenance for `user` on `dashboard`
    pub fn access_reason(&self, user: &User, dashboard: &Dashboard) -> AccessDecision {
        let decision = self.decide(user, dashboard);
        tracing::trace!(
            uid = %user.uid,
            dashboard = %dashboard.id,
            has_access = decision.has_access,
            reason = %decision.reason,
            "evaluated dashboard access"
        );
        decision
    }

    fn decide(&self, user: &User, dashboard: &Dashboard) -> AccessDecision {
        let restrictions = &dashboard.restrictions;

        if restrictions.is_revoked(&user.uid) {
            return AccessDecision::deny(AccessReason::Revoked);
        }

        if user.is_admin() {
            return AccessDecision::admin();
        }

        if dashboard.is_archived {
            return AccessDecision::deny(AccessReason::Archived);
        }

        if restrictions.is_expired(&user.uid, self.now) {
            return AccessDecision::deny(AccessReason::Expired);
        }

        if let Some(granted_by) = direct_grant(user, &dashboard.access.direct) {
            return AccessDecision::granted(granted_by);
        }

        if let Some(granted_by) = company_grant(user, dashboard) {
            return AccessDecision::granted(granted_by);
        }

        AccessDecision::deny(AccessReason::NoMatch)
    }

    /// Dashboards `user` may access, in input order
    pub fn filter_accessible(&self, user: &User, dashboards: &[Dashboard]) -> Vec<Dashboard> {
        self.filter_accessible_refs(user, dashboards)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Borrowing variant of [`AccessEvaluator::filter_accessible`]
    pub fn filter_accessible_refs<'a, I>(&self, user: &User, dashboards: I) -> Vec<&'a Dashboard>
    where
        I: IntoIterator<Item = &'a Dashboard>,
    {
        let accessible: Vec<&Dashboard> = dashboards
            .into_iter()
            .filter(|dashboard| self.can_access(user, dashboard))
            .collect();
        tracing::debug!(uid = %user.uid, count = accessible.len(), "filtered accessible dashboards");
        accessible
    }

    /// Every uid in `users` that passes [`AccessEvaluator::can_access`] on `dashboard`
    pub fn accessible_users<'a, I>(&self, dashboard: &Dashboard, users: I) -> BTreeSet<UserId>
    where
        I: IntoIterator<Item = &'a User>,
    {
        self.accessible_user_records(dashboard, users)
            .into_iter()
            .map(|user| user.uid.clone())
            .collect()
    }

    /// Users in `users` that can access `dashboard`, in input order
    pub fn accessible_user_records<'a, I>(&self, dashboard: &Dashboard, users: I) -> Vec<&'a User>
    where
        I: IntoIterator<Item = &'a User>,
    {
        users
            .into_iter()
            .filter(|user| self.can_access(user, dashboard))
            .collect()
    }
}

/// Layer 1: user id, then role, then the first of the user's groups
fn direct_grant(user: &User, direct: &DirectAccess) -> Option<GrantedBy> {
    if direct.users.contains(&user.uid) {
        return Some(GrantedBy::direct(GrantKind::User, user.uid.as_str()));
    }

    if direct.roles.contains(&user.role) {
        return Some(GrantedBy::direct(GrantKind::Role, user.role.as_str()));
    }

    user.groups
        .iter()
        .find(|group| direct.groups.contains(*group))
        .map(|group| GrantedBy::direct(GrantKind::Group, group.as_str()))
}

/// Layer 2: only the entry for the user's own company is consulted
fn company_grant(user: &User, dashboard: &Dashboard) -> Option<GrantedBy> {
    let grant = dashboard.access.company_grant(&user.company)?;

    if grant.roles.contains(&user.role) {
        return Some(GrantedBy::company(
            GrantKind::Role,
            user.role.as_str(),
            user.company.clone(),
        ));
    }

    user.groups
        .iter()
        .find(|group| grant.groups.contains(*group))
        .map(|group| GrantedBy::company(GrantKind::Group, group.as_str(), user.company.clone()))
}
