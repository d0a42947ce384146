//! Account registration.

use axum::{
    extract::{rejection::JsonRejection, OriginalUri, State},
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};

use super::created;
use crate::db::{is_unique_violation, Database, UserRepository};
use crate::error::{Error, Result};
use crate::models::{NewUser, UserResponse};
use crate::password;

const REQUIRED_FIELDS: &[&str] = &["username", "password"];
const STRING_FIELDS: &[&str] = &["username", "fullname", "password"];
const TRIMMED_FIELDS: &[&str] = &["username", "password"];

/// (field, min chars, max chars)
const SIZED_FIELDS: &[(&str, usize, Option<usize>)] =
    &[("username", 1, None), ("password", 8, Some(72))];

/// A registration payload that passed every shape and size check.
#[derive(Debug)]
struct Registration {
    username: String,
    fullname: Option<String>,
    password: String,
}

impl Registration {
    /// Checks run in a fixed order and the first failure wins: presence,
    /// type, surrounding whitespace, then length.
    fn from_json(body: &Value) -> Result<Self> {
        let empty = Map::new();
        let fields = body.as_object().unwrap_or(&empty);

        if let Some(field) = REQUIRED_FIELDS.iter().find(|f| !fields.contains_key(**f)) {
            return Err(Error::field(
                field,
                format!("Missing '{}' in request body", field),
            ));
        }

        if let Some(field) = STRING_FIELDS
            .iter()
            .find(|f| fields.get(**f).is_some_and(|v| !v.is_string()))
        {
            return Err(Error::field(
                field,
                format!("Field: '{}' must be type String", field),
            ));
        }

        let text = |field: &str| fields.get(field).and_then(Value::as_str).unwrap_or_default();

        if let Some(field) = TRIMMED_FIELDS.iter().find(|f| text(**f).trim() != text(**f)) {
            return Err(Error::field(
                field,
                format!("Field: '{}' cannot start or end with whitespace", field),
            ));
        }

        let length = |field: &str| text(field).trim().chars().count();

        if let Some((field, min, _)) = SIZED_FIELDS.iter().find(|(f, min, _)| length(*f) < *min) {
            return Err(Error::field(
                field,
                format!("Field: '{}' must be at least {} characters long", field, min),
            ));
        }

        if let Some((field, _, Some(max))) = SIZED_FIELDS
            .iter()
            .find(|(f, _, max)| max.is_some_and(|max| length(*f) > max))
        {
            return Err(Error::field(
                field,
                format!("Field: '{}' must be at most {} characters long", field, max),
            ));
        }

        Ok(Self {
            username: text("username").to_string(),
            fullname: fields
                .get("fullname")
                .and_then(Value::as_str)
                .map(|name| name.trim().to_string()),
            password: text("password").to_string(),
        })
    }
}

pub async fn register(
    State(db): State<Database>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(body) = payload?;
    let Registration {
        username,
        fullname,
        password,
    } = Registration::from_json(&body)?;

    let password_hash =
        tokio::task::spawn_blocking(move || password::hash_password(&password)).await??;

    let user = db
        .create_user(NewUser {
            username,
            fullname,
            password_hash,
        })
        .map_err(|e| {
            if is_unique_violation(&e) {
                Error::DuplicateUsername
            } else {
                Error::Internal(e)
            }
        })?;

    tracing::info!("Registered user {} ({})", user.username, user.id);
    Ok(created(&uri, user.id, UserResponse::from(user)))
}
