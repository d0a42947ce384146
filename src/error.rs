//! Error taxonomy shared by the validators, handlers and response layer.

/// Everything a request can fail with.
///
/// Client-facing variants carry the message that is shown to the caller.
/// [`Error::Internal`] wraps storage and runtime failures; its details are
/// logged and never rendered.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A registration field is missing, mistyped or out of bounds.
    #[error("{message}")]
    Validation {
        message: String,
        location: Option<String>,
    },

    /// A note, folder or tag payload is missing a required value, or the
    /// body could not be decoded.
    #[error("{0}")]
    InvalidInput(String),

    /// A path identifier is not well formed.
    #[error("{0}")]
    InvalidArgument(String),

    /// A folder or tag reference is malformed or not owned by the caller.
    #[error("{0}")]
    InvalidReference(String),

    #[error("The username already exists")]
    DuplicateUsername,

    /// A folder or tag with this name already exists for the caller.
    #[error("The {0} name already exists")]
    DuplicateName(&'static str),

    #[error("Not Found")]
    NotFound,

    #[error("{0}")]
    Unauthorized(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// A registration validation failure pinned to one field.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            location: Some(field.to_string()),
        }
    }

    /// Machine-readable reason rendered alongside the message.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Validation { .. } | Self::InvalidInput(_) => "ValidationError",
            Self::InvalidArgument(_) => "InvalidArgument",
            Self::InvalidReference(_) => "InvalidReference",
            Self::DuplicateUsername => "DuplicateUsername",
            Self::DuplicateName(_) => "DuplicateName",
            Self::NotFound => "NotFound",
            Self::Unauthorized(_) => "Unauthorized",
            Self::Internal(_) => "InternalServerError",
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Internal(e.into())
    }
}
