//! Access questions asked by id
//!
//! [`AccessService`] resolves ids through a [`Directory`] and hands the records
//! to [`AccessEvaluator`]. It adds no rules of its own: an id that does not
//! resolve is a `NotFound` error, everything else is the evaluator's answer.

use crate::directory::Directory;
use crate::folders::{FolderTree, VisibleFolder};
use dashgate_authorization::{AccessDecision, AccessEvaluator, DashboardCard};
use dashgate_core::{Dashboard, DashboardId, DashgateError, Folder, FolderId, Result, User, UserId};
use std::collections::BTreeSet;

/// Dashboard access over a directory, evaluated at one instant
#[derive(Debug, Clone)]
pub struct AccessService<D> {
    directory: D,
    evaluator: AccessEvaluator,
}

impl<D: Directory> AccessService<D> {
    /// Service answering from `directory` with `evaluator`
    pub fn new(directory: D, evaluator: AccessEvaluator) -> Self {
        Self {
            directory,
            evaluator,
        }
    }

    /// Underlying directory
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Evaluator in use
    pub fn evaluator(&self) -> &AccessEvaluator {
        &self.evaluator
    }

    /// Resolve a user or fail with `NotFound`
    pub fn user(&self, uid: &UserId) -> Result<&User> {
        self.directory
            .user(uid)
            .ok_or_else(|| DashgateError::not_found(format!("user {uid} not found")))
    }

    /// Resolve a dashboard or fail with `NotFound`
    pub fn dashboard(&self, id: &DashboardId) -> Result<&Dashboard> {
        self.directory
            .dashboard(id)
            .ok_or_else(|| DashgateError::not_found(format!("dashboard {id} not found")))
    }

    /// Resolve a folder or fail with `NotFound`
    pub fn folder(&self, id: &FolderId) -> Result<&Folder> {
        self.directory
            .folder(id)
            .ok_or_else(|| DashgateError::not_found(format!("folder {id} not found")))
    }

    /// Whether `uid` may access dashboard `dashboard_id`
    pub fn can_access_dashboard(&self, dashboard_id: &DashboardId, uid: &UserId) -> Result<bool> {
        Ok(self.access_reason(dashboard_id, uid)?.has_access)
    }

    /// Decision with provenance for `uid` on dashboard `dashboard_id`
    pub fn access_reason(&self, dashboard_id: &DashboardId, uid: &UserId) -> Result<AccessDecision> {
        let dashboard = self.dashboard(dashboard_id)?;
        let user = self.user(uid)?;
        Ok(self.evaluator.access_reason(user, dashboard))
    }

    /// Dashboards `uid` may access, in directory order
    pub fn accessible_dashboards(&self, uid: &UserId) -> Result<Vec<&Dashboard>> {
        let user = self.user(uid)?;
        Ok(self
            .evaluator
            .filter_accessible_refs(user, self.directory.dashboards()))
    }

    /// Accessible dashboards placed directly in folder `folder_id`
    pub fn dashboards_in_folder(&self, folder_id: &FolderId, uid: &UserId) -> Result<Vec<&Dashboard>> {
        self.folder(folder_id)?;
        let user = self.user(uid)?;
        let in_folder = self
            .directory
            .dashboards()
            .iter()
            .filter(|dashboard| &dashboard.folder_id == folder_id);
        Ok(self.evaluator.filter_accessible_refs(user, in_folder))
    }

    /// Every uid in the directory that can access dashboard `dashboard_id`
    pub fn accessible_users(&self, dashboard_id: &DashboardId) -> Result<BTreeSet<UserId>> {
        let dashboard = self.dashboard(dashboard_id)?;
        let users = self
            .evaluator
            .accessible_users(dashboard, self.directory.users());
        tracing::debug!(dashboard = %dashboard_id, count = users.len(), "resolved accessible users");
        Ok(users)
    }

    /// Directory users named in the dashboard's direct user grants, in directory order
    ///
    /// Uids with no directory record are skipped.
    pub fn direct_access_users(&self, dashboard_id: &DashboardId) -> Result<Vec<&User>> {
        let dashboard = self.dashboard(dashboard_id)?;
        let granted = &dashboard.access.direct.users;
        Ok(self
            .directory
            .users()
            .iter()
            .filter(|user| granted.contains(&user.uid))
            .collect())
    }

    /// Decision and capabilities for `uid` on `dashboard_id`, `None` when denied
    pub fn dashboard_card(&self, dashboard_id: &DashboardId, uid: &UserId) -> Result<Option<DashboardCard>> {
        let dashboard = self.dashboard(dashboard_id)?;
        let user = self.user(uid)?;
        Ok(DashboardCard::build(&self.evaluator, user, dashboard))
    }

    /// Cards for every dashboard `uid` may access, in directory order
    pub fn dashboard_cards(&self, uid: &UserId) -> Result<Vec<DashboardCard>> {
        let user = self.user(uid)?;
        Ok(self
            .directory
            .dashboards()
            .iter()
            .filter_map(|dashboard| DashboardCard::build(&self.evaluator, user, dashboard))
            .collect())
    }

    /// Folders containing an accessible dashboard directly or below, in directory order
    pub fn visible_folders(&self, uid: &UserId) -> Result<Vec<VisibleFolder>> {
        let accessible = self.accessible_dashboards(uid)?;
        Ok(FolderTree::new(self.directory.folders()).visible(accessible))
    }

    /// Folders from the outermost ancestor down to `folder_id`
    pub fn folder_path(&self, folder_id: &FolderId) -> Result<Vec<&Folder>> {
        self.folder(folder_id)?;
        Ok(FolderTree::new(self.directory.folders()).path(folder_id))
    }
}
