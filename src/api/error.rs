//! The single place where errors become HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub reason: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

fn status_code(err: &Error) -> StatusCode {
    match err {
        Error::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        Error::InvalidInput(_)
        | Error::InvalidArgument(_)
        | Error::InvalidReference(_)
        | Error::DuplicateUsername
        | Error::DuplicateName(_) => StatusCode::BAD_REQUEST,
        Error::NotFound => StatusCode::NOT_FOUND,
        Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = status_code(&self);

        // Internal details stay in the log.
        let message = match &self {
            Error::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                "Internal Server Error".to_string()
            }
            Error::NotFound => self.to_string(),
            other => {
                tracing::warn!("{}: {}", other.reason(), other);
                other.to_string()
            }
        };

        let location = match &self {
            Error::Validation { location, .. } => location.clone(),
            _ => None,
        };

        let body = Json(ErrorBody {
            code: status.as_u16(),
            reason: self.reason().to_string(),
            message,
            location,
        });

        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidInput(rejection.body_text())
    }
}
