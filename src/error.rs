use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

pub const FALLBACK_DETAILS: &str = "Unexpected error occurred.";

/// Closed set of error kinds. Several kinds share a status code; clients tell
/// them apart by [`ErrorKind::name`], which is sent as the `error` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Api,
    BadRequest,
    DuplicateEntry,
    Unauthorized,
    UnauthorizedServiceAccount,
    Forbidden,
    ExpiredToken,
    PasswordPolicy,
    PasswordExpired,
    NotFound,
    MethodNotAllowed,
    Conflict,
    TooManyRequests,
    InternalError,
    NotImplemented,
    BadGateway,
    ServiceUnavailable,
    /// Errors raised by the HTTP layer itself (unknown route, malformed body or path).
    Http,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 18] = [
        ErrorKind::Api,
        ErrorKind::BadRequest,
        ErrorKind::DuplicateEntry,
        ErrorKind::Unauthorized,
        ErrorKind::UnauthorizedServiceAccount,
        ErrorKind::Forbidden,
        ErrorKind::ExpiredToken,
        ErrorKind::PasswordPolicy,
        ErrorKind::PasswordExpired,
        ErrorKind::NotFound,
        ErrorKind::MethodNotAllowed,
        ErrorKind::Conflict,
        ErrorKind::TooManyRequests,
        ErrorKind::InternalError,
        ErrorKind::NotImplemented,
        ErrorKind::BadGateway,
        ErrorKind::ServiceUnavailable,
        ErrorKind::Http,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Api => "ApiException",
            ErrorKind::BadRequest => "BadRequestApiException",
            ErrorKind::DuplicateEntry => "DuplicateEntryException",
            ErrorKind::Unauthorized => "UnauthorizedApiException",
            ErrorKind::UnauthorizedServiceAccount => "UnauthorizedServiceAccountException",
            ErrorKind::Forbidden => "ForbiddenApiException",
            ErrorKind::ExpiredToken => "ExpiredTokenException",
            ErrorKind::PasswordPolicy => "PasswordPolicyException",
            ErrorKind::PasswordExpired => "PasswordExpiredException",
            ErrorKind::NotFound => "NotFoundApiException",
            ErrorKind::MethodNotAllowed => "MethodNotAllowedApiException",
            ErrorKind::Conflict => "ConflictApiException",
            ErrorKind::TooManyRequests => "TooManyRequestsApiException",
            ErrorKind::InternalError => "InternalErrorApiException",
            ErrorKind::NotImplemented => "NotImplementedApiException",
            ErrorKind::BadGateway => "BadGatewayApiException",
            ErrorKind::ServiceUnavailable => "ServiceUnavailable",
            ErrorKind::Http => "HTTPException",
        }
    }

    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::BadRequest | ErrorKind::DuplicateEntry => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized | ErrorKind::UnauthorizedServiceAccount => {
                StatusCode::UNAUTHORIZED
            }
            ErrorKind::Forbidden
            | ErrorKind::ExpiredToken
            | ErrorKind::PasswordPolicy
            | ErrorKind::PasswordExpired => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            ErrorKind::BadGateway => StatusCode::BAD_GATEWAY,
            ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Api | ErrorKind::InternalError | ErrorKind::Http => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Canonical kind for a status code. Informational only: the mapping is
    /// many-to-one in the other direction, so it cannot recover the kind an
    /// error was raised with.
    pub fn for_status(status: u16) -> Option<ErrorKind> {
        let kind = match status {
            400 => ErrorKind::BadRequest,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            405 => ErrorKind::MethodNotAllowed,
            409 => ErrorKind::Conflict,
            429 => ErrorKind::TooManyRequests,
            500 => ErrorKind::InternalError,
            501 => ErrorKind::NotImplemented,
            502 => ErrorKind::BadGateway,
            503 => ErrorKind::ServiceUnavailable,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {}", details_or_fallback(.message))]
pub struct ApiError {
    kind: ErrorKind,
    message: Option<String>,
    status_code: Option<u16>,
}

/// Uniform JSON body for every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Error kind name, e.g. `NotFoundApiException`
    pub error: String,
    /// Human-readable message
    pub details: String,
    /// HTTP status code of the response
    pub status_code: u16,
}

/// Attached to error responses so the boundary middleware can log them with
/// the request URL.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub error: &'static str,
    pub details: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
            status_code: Some(kind.status_code().as_u16()),
        }
    }

    /// Error of the given kind without a message; the body falls back to
    /// [`FALLBACK_DETAILS`].
    pub fn bare(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            status_code: Some(kind.status_code().as_u16()),
        }
    }

    /// Base kind with an explicit status code.
    pub fn with_status(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            kind: ErrorKind::Api,
            message: Some(message.into()),
            status_code: Some(status_code),
        }
    }

    /// Error produced by the HTTP layer rather than application code.
    pub fn http(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Http,
            message: Some(message.into()),
            status_code: Some(status.as_u16()),
        }
    }

    pub fn without_status(mut self) -> Self {
        self.status_code = None;
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternalError, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Status to respond with: the carried code when present and valid,
    /// otherwise 500.
    pub fn status(&self) -> StatusCode {
        self.status_code
            .filter(|code| *code != 0)
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn details(&self) -> &str {
        details_or_fallback(&self.message)
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.kind.name().to_string(),
            details: self.details().to_string(),
            status_code: self.status().as_u16(),
        }
    }
}

fn details_or_fallback(message: &Option<String>) -> &str {
    match message.as_deref() {
        Some(m) if !m.is_empty() => m,
        _ => FALLBACK_DETAILS,
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(e: sea_orm::DbErr) -> Self {
        tracing::error!("Database error: {:?}", e);
        ApiError::internal("Database error")
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(e: validator::ValidationErrors) -> Self {
        ApiError::bad_request(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::http(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::http(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.body();
        let report = ErrorReport {
            error: self.kind.name(),
            details: self.message.unwrap_or_default(),
        };

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(report);
        response
    }
}

pub type AppResult<T> = Result<T, ApiError>;
