use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::tag::Tag;

/// A note, as returned by the store and the API.
///
/// `tags` is always expanded to full [`Tag`] objects, in the order they were
/// attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<Uuid>,
    pub tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated note ready to be inserted.
///
/// References in `folder_id` and `tags` must already have been checked
/// against the owner.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub user_id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<Uuid>,
    pub tags: Vec<Uuid>,
}

/// A validated set of changes for an existing note.
///
/// `content` and `tags` always replace the stored values, so `None` clears
/// the content. `title` and `folder_id` are kept when `None`.
#[derive(Debug, Clone, Default)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<Uuid>,
    pub tags: Vec<Uuid>,
}

/// Filters for listing a user's notes. All present filters must match.
#[derive(Debug, Clone, Default)]
pub struct NoteFilter {
    /// Case-insensitive substring matched against title or content.
    pub search_term: Option<String>,
    pub folder_id: Option<String>,
    pub tag_id: Option<String>,
}

/// Request body for `POST /notes`.
///
/// Ids arrive as raw strings so that malformed references can be reported
/// as such instead of as a body deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Request body for `PUT /notes/{id}`. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Query string for `GET /notes`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotesQuery {
    pub search_term: Option<String>,
    pub folder_id: Option<String>,
    pub tag_id: Option<String>,
}

impl From<ListNotesQuery> for NoteFilter {
    fn from(query: ListNotesQuery) -> Self {
        Self {
            search_term: query.search_term.filter(|s| !s.is_empty()),
            folder_id: query.folder_id.filter(|s| !s.is_empty()),
            tag_id: query.tag_id.filter(|s| !s.is_empty()),
        }
    }
}
