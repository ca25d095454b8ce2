//! Authentication ports.

use uuid::Uuid;

/// Claims carried in a signed session token.
///
/// Tokens carry no expiry, issuer or audience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// The user id the token was issued for.
    pub subject: String,
    pub email: String,
}

/// Token service trait for issuing and verifying signed session tokens.
pub trait TokenService: Send + Sync {
    /// Issue a token for a user.
    fn generate_token(&self, user_id: Uuid, email: &str) -> Result<String, AuthError>;

    /// Verify the signature and decode the claims.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Malformed authorization header: {0}")]
    MalformedHeader(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Malformed token payload: {0}")]
    MalformedPayload(String),

    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    /// True when the request carried no usable credentials at all, as opposed
    /// to credentials that were presented and rejected.
    pub fn is_missing_credentials(&self) -> bool {
        matches!(self, AuthError::MissingAuth | AuthError::MalformedHeader(_))
    }
}
