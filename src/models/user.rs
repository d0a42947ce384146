use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored user account.
///
/// This type is deliberately not `Serialize`: it carries the password digest.
/// Map it to [`UserResponse`] before it leaves the process.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub fullname: Option<String>,
    /// PHC-format password digest.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A validated registration, with the password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub fullname: Option<String>,
    pub password_hash: String,
}

/// Public representation of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub fullname: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            fullname: user.fullname,
        }
    }
}

/// Credentials for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// An issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    pub auth_token: String,
    pub expires_at: DateTime<Utc>,
}

/// The authenticated caller, attached to a request by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}
