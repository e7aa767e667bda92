use crate::security::resource::ResourceGuardError;
use crate::validation::ValidationError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::borrow::Cow;
use std::fmt::Display;
use tracing::{error, warn};

/// Errors that know their HTTP status.
///
/// Implemented by every slice error through `#[atelier_error(http)]`; `?` then turns them
/// into [`ApiError`] inside handlers.
pub trait HttpError: Display {
    fn status_code(&self) -> u16;
}

/// Uniform error body: `status` is `fail` for client errors and `error` for server errors.
#[atelier_derive::api_model]
pub struct ErrorBody {
    pub status: String,
    pub message: String,
}

/// Error returned by every handler.
///
/// Client errors expose their message. Server errors are logged with their detail and
/// answered with a generic message.
#[atelier_derive::atelier_error]
pub enum ApiError {
    #[status(400)]
    #[error("{message}")]
    BadRequest { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[status(401)]
    #[error("{message}")]
    Unauthorized { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[status(403)]
    #[error("{message}")]
    Forbidden { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[status(404)]
    #[error("{message}")]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[status(409)]
    #[error("{message}")]
    Conflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[status(429)]
    #[error("{message}")]
    TooManyRequests { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[status(502)]
    #[error("Upstream failure{}: {message}", format_context(.context))]
    BadGateway { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ApiError {
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest { message: message.into(), context: None }
    }

    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Unauthorized { message: message.into(), context: None }
    }

    pub fn forbidden(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Forbidden { message: message.into(), context: None }
    }

    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound { message: message.into(), context: None }
    }

    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Conflict { message: message.into(), context: None }
    }

    /// Maps a status code onto the matching variant; unknown codes become `Internal`.
    pub fn from_status(status: u16, message: impl Into<Cow<'static, str>>) -> Self {
        let message = message.into();
        match status {
            400 | 422 => Self::BadRequest { message, context: None },
            401 => Self::Unauthorized { message, context: None },
            403 => Self::Forbidden { message, context: None },
            404 => Self::NotFound { message, context: None },
            409 => Self::Conflict { message, context: None },
            429 => Self::TooManyRequests { message, context: None },
            502 => Self::BadGateway { message, context: None },
            _ => Self::Internal { message, context: None },
        }
    }

    fn public_message(&self) -> Cow<'static, str> {
        match self {
            Self::BadGateway { .. } => Cow::Borrowed("Upstream service failed"),
            Self::Internal { .. } => Cow::Borrowed("Internal server error"),
            other => Cow::Owned(other.to_string()),
        }
    }
}

impl<E: HttpError> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self::from_status(err.status_code(), err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<ResourceGuardError> for ApiError {
    fn from(err: ResourceGuardError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.status_code();
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(status = code, error = %self, "Request failed");
        } else {
            warn!(status = code, error = %self, "Request rejected");
        }

        let body = ErrorBody {
            status: if status.is_server_error() { "error" } else { "fail" }.to_owned(),
            message: self.public_message().into_owned(),
        };

        (status, axum::Json(body)).into_response()
    }
}
