use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named container for notes.
///
/// Folder names are unique per user. Deleting a folder does not delete its
/// notes; they simply lose their `folder_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or renaming a folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolderInput {
    pub name: Option<String>,
}
