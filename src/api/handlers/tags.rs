use axum::{
    extract::{rejection::JsonRejection, OriginalUri, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use super::{created, name_conflict, path_id, required_name};
use crate::db::{Database, TagRepository};
use crate::error::{Error, Result};
use crate::models::{AuthUser, Tag, TagInput};

pub async fn list_tags(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Tag>>> {
    Ok(Json(db.find_tags(user.id)?))
}

pub async fn get_tag(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Tag>> {
    let id = path_id(&id)?;
    db.find_tag(id, user.id)?.map(Json).ok_or(Error::NotFound)
}

pub async fn create_tag(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<TagInput>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(input) = payload?;
    let name = required_name(input.name)?;

    let tag = db
        .create_tag(user.id, &name)
        .map_err(name_conflict("tag"))?;

    Ok(created(&uri, tag.id, tag))
}

pub async fn update_tag(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<TagInput>, JsonRejection>,
) -> Result<Json<Tag>> {
    let id = path_id(&id)?;
    let Json(input) = payload?;
    let name = required_name(input.name)?;

    db.update_tag(id, user.id, &name)
        .map_err(name_conflict("tag"))?
        .map(Json)
        .ok_or(Error::NotFound)
}

/// The tag is removed from every note that carried it.
pub async fn delete_tag(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = path_id(&id)?;
    db.delete_tag(id, user.id)?;
    Ok(StatusCode::NO_CONTENT)
}
