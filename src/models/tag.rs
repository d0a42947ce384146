use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A label that can be attached to any number of notes.
///
/// Tag names are unique per user. Deleting a tag removes it from every note
/// that carried it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or renaming a tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagInput {
    pub name: Option<String>,
}
