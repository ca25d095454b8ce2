//! Error handling - every failure leaves the API as an [`ErrorResponse`] body.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use scribe_core::ports::AuthError;
use scribe_core::{DomainError, RepoError};
use scribe_shared::{ErrorResponse, FieldError};
use validator::ValidationErrors;

/// Whether 500 responses carry the underlying message. Off in production.
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

pub fn expose_internal_errors(enabled: bool) {
    EXPOSE_INTERNAL_ERRORS.store(enabled, Ordering::Relaxed);
}

/// Application-level error type that converts to JSON error responses.
#[derive(Debug)]
pub enum AppError {
    Validation(Vec<FieldError>),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl AppError {
    /// A validation failure pinned to a single request location.
    pub fn invalid(path: &str, code: &str, message: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError::new(path, message, code)])
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::Validation(details) => ErrorResponse::validation(details.clone()),
            AppError::Unauthorized(msg) => ErrorResponse::unauthorized(msg),
            AppError::Forbidden(msg) => ErrorResponse::forbidden(msg),
            AppError::NotFound(msg) => ErrorResponse::not_found(msg),
            AppError::Conflict(msg) => ErrorResponse::conflict(msg),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                if EXPOSE_INTERNAL_ERRORS.load(Ordering::Relaxed) {
                    ErrorResponse::internal_error(detail)
                } else {
                    ErrorResponse::internal_error("An unexpected error occurred")
                }
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, .. } => {
                AppError::NotFound(format!("{} not found", entity_type))
            }
            DomainError::Forbidden(msg) => AppError::Forbidden(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(FieldError::from_validation(&errors))
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        if err.is_missing_credentials() {
            return AppError::Unauthorized("Missing or invalid authorization header".to_string());
        }
        match err {
            AuthError::Signing(msg) => AppError::Internal(msg),
            other => AppError::Forbidden(other.to_string()),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Body deserialization failures become 400 validation errors.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::invalid("body", "invalid_body", err.to_string()).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::invalid("query", "invalid_query", err.to_string()).into()
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::invalid("id", "invalid_uuid", err.to_string()).into()
}
