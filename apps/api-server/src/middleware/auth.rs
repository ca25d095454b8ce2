//! Authentication extractor.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use uuid::Uuid;

use scribe_core::ports::{AuthError, TokenClaims};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Authenticated caller, taken from a verified Bearer token.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.subject)
/// }
/// ```
///
/// A missing or non-Bearer `Authorization` header rejects with 401; a token
/// that fails verification rejects with 403.
#[derive(Debug, Clone)]
pub struct Identity {
    pub subject: String,
    pub email: String,
}

impl Identity {
    /// Whether the token was issued for the user with this id.
    pub fn is_user(&self, id: Uuid) -> bool {
        self.subject == id.to_string()
    }
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            subject: claims.subject,
            email: claims.email,
        }
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let value = value
        .to_str()
        .map_err(|_| AuthError::MalformedHeader("non-ASCII header value".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::MalformedHeader("expected Bearer token".to_string()))
}

fn authenticate(req: &HttpRequest) -> Result<Identity, AppError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!("AppState not found in app data");
        AppError::Internal("Server configuration error".to_string())
    })?;

    let token = bearer_token(req).inspect_err(|e| {
        tracing::debug!(error = %e, "Rejected request without usable credentials");
    })?;

    let claims = state.tokens.validate_token(token).inspect_err(|e| {
        tracing::warn!(error = %e, "Token verification failed");
    })?;

    Ok(Identity::from(claims))
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
