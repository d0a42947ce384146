//! Bearer token authentication for the protected routes.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::db::{Database, UserRepository};
use crate::error::Error;
use crate::models::AuthUser;

/// Resolve the bearer token to a user and attach it as an [`AuthUser`]
/// request extension. Missing, malformed, unknown and expired tokens are
/// all rejected with 401.
pub async fn require_auth(
    State(db): State<Database>,
    mut request: Request,
    next: Next,
) -> Result<Response, Error> {
    let token = match bearer_token(request.headers()) {
        Some(token) => token.to_string(),
        None => {
            tracing::warn!("Missing or malformed Authorization header");
            return Err(unauthorized());
        }
    };

    let Some(user) = db.find_user_by_token(&token)? else {
        tracing::warn!("Invalid or expired bearer token");
        return Err(unauthorized());
    };

    request.extensions_mut().insert(AuthUser {
        id: user.id,
        username: user.username,
    });

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn unauthorized() -> Error {
    Error::Unauthorized("Unauthorized".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc123")), Some("abc123"));
    }

    #[test]
    fn rejects_other_schemes() {
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
    }

    #[test]
    fn rejects_empty_token() {
        assert_eq!(bearer_token(&headers("Bearer ")), None);
    }

    #[test]
    fn missing_header_has_no_token() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
