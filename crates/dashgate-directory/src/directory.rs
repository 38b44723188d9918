//! Record lookup

use crate::snapshot::Snapshot;
use dashgate_core::{Dashboard, DashboardId, Folder, FolderId, User, UserId};
use std::collections::HashMap;
use std::hash::Hash;

/// Read access to users, dashboards and folders
///
/// Listing methods return records in directory order; callers rely on that
/// order for stable output.
pub trait Directory {
    /// Look up a user by uid
    fn user(&self, uid: &UserId) -> Option<&User>;

    /// Look up a dashboard by id
    fn dashboard(&self, id: &DashboardId) -> Option<&Dashboard>;

    /// Look up a folder by id
    fn folder(&self, id: &FolderId) -> Option<&Folder>;

    /// All users
    fn users(&self) -> &[User];

    /// All dashboards
    fn dashboards(&self) -> &[Dashboard];

    /// All folders
    fn folders(&self) -> &[Folder];
}

impl<D: Directory + ?Sized> Directory for &D {
    fn user(&self, uid: &UserId) -> Option<&User> {
        (**self).user(uid)
    }

    fn dashboard(&self, id: &DashboardId) -> Option<&Dashboard> {
        (**self).dashboard(id)
    }

    fn folder(&self, id: &FolderId) -> Option<&Folder> {
        (**self).folder(id)
    }

    fn users(&self) -> &[User] {
        (**self).users()
    }

    fn dashboards(&self) -> &[Dashboard] {
        (**self).dashboards()
    }

    fn folders(&self) -> &[Folder] {
        (**self).folders()
    }
}

/// Directory held entirely in memory
///
/// Ids are unique: when a record repeats an id already seen, the first one is
/// kept and the duplicate is dropped with a warning.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    users: Vec<User>,
    dashboards: Vec<Dashboard>,
    folders: Vec<Folder>,
    user_index: HashMap<UserId, usize>,
    dashboard_index: HashMap<DashboardId, usize>,
    folder_index: HashMap<FolderId, usize>,
}

impl InMemoryDirectory {
    /// Build a directory from record lists
    pub fn new(users: Vec<User>, dashboards: Vec<Dashboard>, folders: Vec<Folder>) -> Self {
        let (users, user_index) = index_by(users, "user", |user| user.uid.clone());
        let (dashboards, dashboard_index) =
            index_by(dashboards, "dashboard", |dashboard| dashboard.id.clone());
        let (folders, folder_index) = index_by(folders, "folder", |folder| folder.id.clone());
        Self {
            users,
            dashboards,
            folders,
            user_index,
            dashboard_index,
            folder_index,
        }
    }

    /// Number of users
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of dashboards
    pub fn dashboard_count(&self) -> usize {
        self.dashboards.len()
    }

    /// Number of folders
    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }
}

impl From<Snapshot> for InMemoryDirectory {
    fn from(snapshot: Snapshot) -> Self {
        Self::new(snapshot.users, snapshot.dashboards, snapshot.folders)
    }
}

impl Directory for InMemoryDirectory {
    fn user(&self, uid: &UserId) -> Option<&User> {
        self.user_index.get(uid).map(|&i| &self.users[i])
    }

    fn dashboard(&self, id: &DashboardId) -> Option<&Dashboard> {
        self.dashboard_index.get(id).map(|&i| &self.dashboards[i])
    }

    fn folder(&self, id: &FolderId) -> Option<&Folder> {
        self.folder_index.get(id).map(|&i| &self.folders[i])
    }

    fn users(&self) -> &[User] {
        &self.users
    }

    fn dashboards(&self) -> &[Dashboard] {
        &self.dashboards
    }

    fn folders(&self) -> &[Folder] {
        &self.folders
    }
}

fn index_by<T, K, F>(records: Vec<T>, kind: &str, key: F) -> (Vec<T>, HashMap<K, usize>)
where
    K: Eq + Hash + std::fmt::Display,
    F: Fn(&T) -> K,
{
    let mut kept = Vec::with_capacity(records.len());
    let mut index = HashMap::with_capacity(records.len());
    for record in records {
        let id = key(&record);
        if index.contains_key(&id) {
            tracing::warn!(%id, kind, "duplicate id in directory, keeping the first record");
            continue;
        }
        index.insert(id, kept.len());
        kept.push(record);
    }
    (kept, index)
}
