//! Bearer token issuance.

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use crate::config::ServerConfig;
use crate::db::{Database, UserRepository};
use crate::error::{Error, Result};
use crate::models::{AuthToken, AuthUser, LoginInput};
use crate::password;

fn invalid_credentials() -> Error {
    Error::Unauthorized("Incorrect username or password".to_string())
}

/// Exchange a username and password for a bearer token.
pub async fn login(
    State(db): State<Database>,
    State(config): State<ServerConfig>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<AuthToken>> {
    let Json(input) = payload?;

    let Some(user) = db.find_user_by_username(&input.username)? else {
        tracing::warn!("Login attempt for unknown user {}", input.username);
        return Err(invalid_credentials());
    };

    let digest = user.password_hash.clone();
    let matches =
        tokio::task::spawn_blocking(move || password::verify_password(&input.password, &digest))
            .await??;
    if !matches {
        tracing::warn!("Wrong password for user {}", user.username);
        return Err(invalid_credentials());
    }

    let purged = db.purge_expired_tokens()?;
    if purged > 0 {
        tracing::debug!("Purged {} expired tokens", purged);
    }

    let token = db.create_token(user.id, config.token_ttl)?;
    tracing::info!("User {} logged in", user.username);
    Ok(Json(token))
}

/// Issue a fresh token to an already authenticated caller.
pub async fn refresh(
    State(db): State<Database>,
    State(config): State<ServerConfig>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<AuthToken>> {
    db.create_token(user.id, config.token_ttl)
        .map(Json)
        .map_err(Error::from)
}
