use axum::{
    extract::{rejection::JsonRejection, OriginalUri, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use super::{created, name_conflict, path_id, required_name};
use crate::db::{Database, FolderRepository};
use crate::error::{Error, Result};
use crate::models::{AuthUser, Folder, FolderInput};

pub async fn list_folders(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Folder>>> {
    Ok(Json(db.find_folders(user.id)?))
}

pub async fn get_folder(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Folder>> {
    let id = path_id(&id)?;
    db.find_folder(id, user.id)?.map(Json).ok_or(Error::NotFound)
}

pub async fn create_folder(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<FolderInput>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(input) = payload?;
    let name = required_name(input.name)?;

    let folder = db
        .create_folder(user.id, &name)
        .map_err(name_conflict("folder"))?;

    Ok(created(&uri, folder.id, folder))
}

pub async fn update_folder(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<FolderInput>, JsonRejection>,
) -> Result<Json<Folder>> {
    let id = path_id(&id)?;
    let Json(input) = payload?;
    let name = required_name(input.name)?;

    db.update_folder(id, user.id, &name)
        .map_err(name_conflict("folder"))?
        .map(Json)
        .ok_or(Error::NotFound)
}

/// Notes filed in the folder are kept with their folder cleared.
pub async fn delete_folder(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = path_id(&id)?;
    db.delete_folder(id, user.id)?;
    Ok(StatusCode::NO_CONTENT)
}
