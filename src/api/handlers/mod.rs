pub mod auth;
pub mod folders;
pub mod notes;
pub mod tags;
pub mod users;

use axum::{
    http::{header, HeaderName, StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::db::is_unique_violation;
use crate::error::{Error, Result};
use crate::models::parse_id;

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Fallback for unmatched routes. Renders the same body as any other miss.
pub async fn not_found() -> Error {
    Error::NotFound
}

// ============================================================
// Shared helpers
// ============================================================

/// Parse an `{id}` path segment.
fn path_id(raw: &str) -> Result<Uuid> {
    parse_id(raw).ok_or_else(|| Error::InvalidArgument("The `id` is not valid".to_string()))
}

/// A 201 response pointing at the new resource under the request path.
fn created<T>(uri: &Uri, id: Uuid, body: T) -> (StatusCode, [(HeaderName, String); 1], Json<T>) {
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), id);
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(body))
}

/// Folder and tag names are required and may not be empty.
fn required_name(name: Option<String>) -> Result<String> {
    name.filter(|n| !n.is_empty())
        .ok_or_else(|| Error::InvalidInput("Missing `name` in request body".to_string()))
}

/// Map a store error on a named entity, turning a UNIQUE clash into
/// [`Error::DuplicateName`].
fn name_conflict(kind: &'static str) -> impl FnOnce(anyhow::Error) -> Error {
    move |e| {
        if is_unique_violation(&e) {
            Error::DuplicateName(kind)
        } else {
            Error::Internal(e)
        }
    }
}
