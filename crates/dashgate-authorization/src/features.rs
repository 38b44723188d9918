//! Role-based feature permissions
//!
//! Application-level switches (may this role create folders, open the admin
//! area, ...). These are independent of per-dashboard access, which is decided
//! by the evaluator.

use dashgate_core::{Role, User};
use serde::{Deserialize, Serialize};

/// A gated application feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    /// Browse dashboards
    ViewDashboards,
    /// Create dashboards
    CreateDashboard,
    /// Edit dashboards
    EditDashboard,
    /// Delete dashboards
    DeleteDashboard,
    /// Share dashboards
    ShareDashboard,
    /// Create folders
    CreateFolder,
    /// Edit folders
    EditFolder,
    /// Delete folders
    DeleteFolder,
    /// Open the admin area
    AccessAdmin,
    /// Manage user accounts
    ManageUsers,
}

/// Feature switches for one user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturePermissions {
    /// Browse dashboards
    pub can_view_dashboards: bool,
    /// Create dashboards
    pub can_create_dashboard: bool,
    /// Edit dashboards
    pub can_edit_dashboard: bool,
    /// Delete dashboards
    pub can_delete_dashboard: bool,
    /// Share dashboards with other users
    pub can_share_dashboard: bool,
    /// Create folders
    pub can_create_folder: bool,
    /// Rename or move folders
    pub can_edit_folder: bool,
    /// Delete folders
    pub can_delete_folder: bool,
    /// Open the admin area
    pub can_access_admin: bool,
    /// Manage user accounts
    pub can_manage_users: bool,
}

impl FeaturePermissions {
    /// Everything off, used when no user is signed in
    pub fn none() -> Self {
        Self::default()
    }

    /// Switches for `role`
    ///
    /// Admins get every feature. Users and moderators may only view.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self {
                can_view_dashboards: true,
                can_create_dashboard: true,
                can_edit_dashboard: true,
                can_delete_dashboard: true,
                can_share_dashboard: true,
                can_create_folder: true,
                can_edit_folder: true,
                can_delete_folder: true,
                can_access_admin: true,
                can_manage_users: true,
            },
            Role::User | Role::Moderator => Self {
                can_view_dashboards: true,
                ..Self::none()
            },
        }
    }

    /// Switches for an optional signed-in user
    pub fn for_user(user: Option<&User>) -> Self {
        user.map_or_else(Self::none, |user| Self::for_role(user.role))
    }

    /// Whether `feature` is enabled
    pub fn can(&self, feature: Feature) -> bool {
        match feature {
            Feature::ViewDashboards => self.can_view_dashboards,
            Feature::CreateDashboard => self.can_create_dashboard,
            Feature::EditDashboard => self.can_edit_dashboard,
            Feature::DeleteDashboard => self.can_delete_dashboard,
            Feature::ShareDashboard => self.can_share_dashboard,
            Feature::CreateFolder => self.can_create_folder,
            Feature::EditFolder => self.can_edit_folder,
            Feature::DeleteFolder => self.can_delete_folder,
            Feature::AccessAdmin => self.can_access_admin,
            Feature::ManageUsers => self.can_manage_users,
        }
    }

    /// Whether every listed feature is enabled
    pub fn has_all(&self, features: &[Feature]) -> bool {
        features.iter().all(|feature| self.can(*feature))
    }

    /// Whether at least one listed feature is enabled
    pub fn has_any(&self, features: &[Feature]) -> bool {
        features.iter().any(|feature| self.can(*feature))
    }
}
