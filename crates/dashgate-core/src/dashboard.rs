//! Dashboards and folders

use crate::serde_defaults::null_as_default;
use crate::{AccessControl, AccessRestrictions, DashboardId, FolderId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// Kind of embedded report behind a dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardType {
    /// Looker embed, the only supported kind
    #[default]
    Looker,
}

/// A shareable report resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Identifier
    pub id: DashboardId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Containing folder
    #[serde(default, deserialize_with = "null_as_default")]
    pub folder_id: FolderId,
    /// Report kind
    #[serde(default, rename = "type")]
    pub kind: DashboardType,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Looker dashboard id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub looker_dashboard_id: Option<String>,
    /// Looker embed URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub looker_embed_url: Option<String>,
    /// Creator
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner: UserId,
    /// Creation stamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    /// Last update stamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    /// Last editor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<UserId>,
    /// Archived dashboards are visible to admins only
    #[serde(default)]
    pub is_archived: bool,
    /// When the dashboard was archived
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<Timestamp>,
    /// Grant layers 1 and 2
    #[serde(default, deserialize_with = "null_as_default")]
    pub access: AccessControl,
    /// Restriction layer 3
    #[serde(default, deserialize_with = "null_as_default")]
    pub restrictions: AccessRestrictions,
}

impl Dashboard {
    /// Create an unarchived dashboard with empty access configuration
    pub fn new(
        id: impl Into<DashboardId>,
        folder_id: impl Into<FolderId>,
        owner: impl Into<UserId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            folder_id: folder_id.into(),
            kind: DashboardType::Looker,
            description: None,
            looker_dashboard_id: None,
            looker_embed_url: None,
            owner: owner.into(),
            created_at: None,
            updated_at: None,
            updated_by: None,
            is_archived: false,
            archived_at: None,
            access: AccessControl::default(),
            restrictions: AccessRestrictions::default(),
        }
    }

    /// True if `uid` created the dashboard
    pub fn is_owned_by(&self, uid: &UserId) -> bool {
        &self.owner == uid
    }
}

/// Hierarchical container for dashboards
///
/// `parent_id` links form a tree. Whoever creates folders keeps it acyclic;
/// readers still bound their walks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Identifier
    pub id: FolderId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Parent folder, `None` for a root folder
    #[serde(default)]
    pub parent_id: Option<FolderId>,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creator
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_by: UserId,
    /// Moderators who can manage this folder
    #[serde(default, deserialize_with = "null_as_default")]
    pub assigned_moderators: Vec<UserId>,
}

impl Folder {
    /// Create a folder under `parent_id`
    pub fn new(id: impl Into<FolderId>, name: impl Into<String>, parent_id: Option<FolderId>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id,
            description: None,
            created_by: UserId::default(),
            assigned_moderators: Vec::new(),
        }
    }

    /// True for folders without a parent
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
