//! Folder hierarchy and sidebar visibility
//!
//! A folder is visible to a user when it holds an accessible dashboard itself
//! or through any descendant. Parent links are followed at most once per folder,
//! so a malformed tree with a cycle still terminates.

use dashgate_core::{Dashboard, Folder, FolderId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Parent-link view over a folder list
#[derive(Debug, Clone)]
pub struct FolderTree<'a> {
    folders: &'a [Folder],
    by_id: HashMap<&'a FolderId, &'a Folder>,
}

impl<'a> FolderTree<'a> {
    /// Index `folders` by id
    pub fn new(folders: &'a [Folder]) -> Self {
        let mut by_id = HashMap::with_capacity(folders.len());
        for folder in folders {
            by_id.entry(&folder.id).or_insert(folder);
        }
        Self { folders, by_id }
    }

    /// `id` followed by its ancestors, nearest first
    ///
    /// Stops at a root, at a parent id with no folder record, or when a folder
    /// would be visited twice.
    pub fn lineage<'b>(&'b self, id: &'b FolderId) -> Vec<&'b FolderId> {
        let mut lineage = vec![id];
        let mut seen: HashSet<&FolderId> = HashSet::from([id]);
        let mut current = id;

        while lineage.len() <= self.folders.len() {
            let Some(parent) = self
                .by_id
                .get(current)
                .and_then(|folder| folder.parent_id.as_ref())
            else {
                break;
            };
            if !seen.insert(parent) {
                tracing::warn!(folder = %id, %parent, "folder parent links form a cycle");
                break;
            }
            lineage.push(parent);
            current = parent;
        }
        lineage
    }

    /// Folders from the outermost known ancestor down to `id`
    pub fn path(&self, id: &FolderId) -> Vec<&'a Folder> {
        let mut path: Vec<&'a Folder> = self
            .lineage(id)
            .into_iter()
            .filter_map(|id| self.by_id.get(id).copied())
            .collect();
        path.reverse();
        path
    }

    /// Folders holding any of `dashboards`, directly or below, in list order
    pub fn visible<'d, I>(&self, dashboards: I) -> Vec<VisibleFolder>
    where
        I: IntoIterator<Item = &'d Dashboard>,
    {
        let dashboards: Vec<&Dashboard> = dashboards.into_iter().collect();
        let mut direct: HashMap<&FolderId, usize> = HashMap::new();
        let mut visible: HashSet<&FolderId> = HashSet::new();

        for dashboard in &dashboards {
            *direct.entry(&dashboard.folder_id).or_default() += 1;
            visible.extend(self.lineage(&dashboard.folder_id));
        }

        self.folders
            .iter()
            .filter(|folder| visible.contains(&folder.id))
            .map(|folder| VisibleFolder {
                folder: folder.clone(),
                path: self
                    .path(&folder.id)
                    .into_iter()
                    .map(|f| f.name.clone())
                    .collect(),
                accessible_dashboards: direct.get(&folder.id).copied().unwrap_or(0),
            })
            .collect()
    }
}

/// A folder shown in a user's sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleFolder {
    /// The folder record
    pub folder: Folder,
    /// Folder names from the outermost ancestor down to this folder
    pub path: Vec<String>,
    /// Accessible dashboards directly inside this folder
    pub accessible_dashboards: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(id: &str, parent: Option<&str>) -> Folder {
        Folder::new(id, id.to_uppercase(), parent.map(FolderId::from))
    }

    #[test]
    fn lineage_walks_to_root() {
        let folders = vec![
            folder("a", None),
            folder("b", Some("a")),
            folder("c", Some("b")),
        ];
        let tree = FolderTree::new(&folders);
        let id = FolderId::from("c");

        let lineage: Vec<&str> = tree.lineage(&id).into_iter().map(|f| f.as_str()).collect();
        assert_eq!(lineage, ["c", "b", "a"]);
    }

    #[test]
    fn lineage_terminates_on_cycle() {
        let folders = vec![folder("a", Some("c")), folder("b", Some("a")), folder("c", Some("b"))];
        let tree = FolderTree::new(&folders);
        let id = FolderId::from("a");

        assert_eq!(tree.lineage(&id).len(), 3);
    }

    #[test]
    fn lineage_stops_at_unknown_parent() {
        let folders = vec![folder("a", Some("gone"))];
        let tree = FolderTree::new(&folders);
        let id = FolderId::from("a");

        let lineage: Vec<&str> = tree.lineage(&id).into_iter().map(|f| f.as_str()).collect();
        assert_eq!(lineage, ["a", "gone"]);
        assert_eq!(tree.path(&id).len(), 1);
    }

    #[test]
    fn visible_includes_ancestors_in_list_order() {
        let folders = vec![
            folder("root", None),
            folder("empty", Some("root")),
            folder("leaf", Some("root")),
        ];
        let tree = FolderTree::new(&folders);
        let dashboards = vec![Dashboard::new("d1", "leaf", "u1")];

        let visible = tree.visible(&dashboards);
        let ids: Vec<&str> = visible.iter().map(|v| v.folder.id.as_str()).collect();
        assert_eq!(ids, ["root", "leaf"]);
        assert_eq!(visible[0].accessible_dashboards, 0);
        assert_eq!(visible[1].accessible_dashboards, 1);
        assert_eq!(visible[1].path, ["ROOT", "LEAF"]);
    }
}
