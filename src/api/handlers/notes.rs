//! Note CRUD. Every query is scoped to the authenticated user, and every
//! write is preceded by [`validate_references`].

use axum::{
    extract::{rejection::JsonRejection, OriginalUri, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use super::{created, path_id};
use crate::db::{Database, NoteRepository};
use crate::error::{Error, Result};
use crate::models::*;
use crate::validation::validate_references;

fn missing_title() -> Error {
    Error::InvalidInput("Missing `title` in request body".to_string())
}

pub async fn list_notes(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ListNotesQuery>,
) -> Result<Json<Vec<Note>>> {
    let filter = NoteFilter::from(query);
    Ok(Json(db.find_notes(user.id, &filter)?))
}

pub async fn get_note(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Note>> {
    let id = path_id(&id)?;
    db.find_note(id, user.id)?.map(Json).ok_or(Error::NotFound)
}

pub async fn create_note(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<CreateNoteInput>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(input) = payload?;

    let title = input
        .title
        .filter(|t| !t.is_empty())
        .ok_or_else(missing_title)?;
    // An empty folderId means "no folder".
    let folder_id = input.folder_id.filter(|f| !f.is_empty());
    let tags = input.tags.unwrap_or_default();

    let (folder_id, tags) =
        validate_references(&db, folder_id.as_deref(), &tags, user.id).await?;

    let note = db.create_note(NewNote {
        user_id: user.id,
        title,
        content: input.content,
        folder_id,
        tags,
    })?;

    tracing::debug!("Created note {} for user {}", note.id, user.username);
    Ok(created(&uri, note.id, note))
}

/// Replace a note's fields.
///
/// An absent title keeps the stored one; an empty title is rejected. An
/// empty or null folderId leaves the folder as it is. Content and tags are
/// always replaced, so omitting either clears it.
pub async fn update_note(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateNoteInput>, JsonRejection>,
) -> Result<Json<Note>> {
    let id = path_id(&id)?;
    let Json(input) = payload?;

    if input.title.as_deref() == Some("") {
        return Err(missing_title());
    }
    let folder_id = input.folder_id.filter(|f| !f.is_empty());
    let tags = input.tags.unwrap_or_default();

    let (folder_id, tags) =
        validate_references(&db, folder_id.as_deref(), &tags, user.id).await?;

    let changes = NoteChanges {
        title: input.title,
        content: input.content,
        folder_id,
        tags,
    };

    db.update_note(id, user.id, changes)?
        .map(Json)
        .ok_or(Error::NotFound)
}

/// Always 204 for a well-formed id, whether or not anything was deleted.
pub async fn delete_note(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = path_id(&id)?;
    if !db.delete_note(id, user.id)? {
        tracing::debug!("Delete of unknown note {} ignored", id);
    }
    Ok(StatusCode::NO_CONTENT)
}
