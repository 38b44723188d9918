//! Fluent builders for test records

use chrono::Duration;
use dashgate_core::{
    CompanyCode, CompanyGrant, Dashboard, GroupName, Role, Timestamp, User, UserId,
};

/// Builder for [`Dashboard`] access configurations
#[derive(Debug, Clone)]
pub struct DashboardBuilder {
    dashboard: Dashboard,
}

impl DashboardBuilder {
    /// Start from an empty dashboard in folder `root` owned by `owner`
    pub fn new(id: &str) -> Self {
        Self {
            dashboard: Dashboard::new(id, "root", "owner"),
        }
    }

    /// Set the display name
    pub fn named(mut self, name: &str) -> Self {
        self.dashboard.name = name.to_string();
        self
    }

    /// Set the containing folder
    pub fn in_folder(mut self, folder: &str) -> Self {
        self.dashboard.folder_id = folder.into();
        self
    }

    /// Set the owner
    pub fn owned_by(mut self, owner: &str) -> Self {
        self.dashboard.owner = owner.into();
        self
    }

    /// Mark archived
    pub fn archived(mut self) -> Self {
        self.dashboard.is_archived = true;
        self
    }

    /// Layer 1 user grant
    pub fn grant_user(mut self, uid: &str) -> Self {
        self.dashboard.access.direct.users.insert(UserId::from(uid));
        self
    }

    /// Layer 1 role grant
    pub fn grant_role(mut self, role: Role) -> Self {
        self.dashboard.access.direct.roles.insert(role);
        self
    }

    /// Layer 1 group grant
    pub fn grant_group(mut self, group: &str) -> Self {
        self.dashboard.access.direct.groups.insert(GroupName::from(group));
        self
    }

    /// Layer 2 role grant within `company`
    pub fn grant_company_role(mut self, company: &str, role: Role) -> Self {
        self.company_entry(company).roles.insert(role);
        self
    }

    /// Layer 2 group grant within `company`
    pub fn grant_company_group(mut self, company: &str, group: &str) -> Self {
        self.company_entry(company).groups.insert(GroupName::from(group));
        self
    }

    /// Add `uid` to the revocation list
    pub fn revoke(mut self, uid: &str) -> Self {
        self.dashboard.restrictions.revoke.insert(UserId::from(uid));
        self
    }

    /// Expire `uid` at `at`
    pub fn expire(mut self, uid: &str, at: Timestamp) -> Self {
        self.dashboard.restrictions.expiry.insert(UserId::from(uid), at);
        self
    }

    /// Expire `uid` one day before `now`
    pub fn expired_for(self, uid: &str, now: Timestamp) -> Self {
        self.expire(uid, now - Duration::days(1))
    }

    /// Finish
    pub fn build(self) -> Dashboard {
        self.dashboard
    }

    fn company_entry(&mut self, company: &str) -> &mut CompanyGrant {
        self.dashboard
            .access
            .company
            .entry(CompanyCode::from(company))
            .or_default()
    }
}

/// Shorthand for a user with groups
pub fn user(uid: &str, role: Role, company: &str, groups: &[&str]) -> User {
    User::new(uid, role, company).with_groups(groups.iter().copied())
}
