//! HS256 session token service.
//!
//! A token is `base64url(header).base64url(claims).base64url(hmac_sha256)`,
//! with the header fixed to `{"typ":"JWT","alg":"HS256"}`. Signature checks
//! compare in constant time.
//!
//! Tokens carry no `exp`, `iss` or `aud` claim and never expire.

use std::collections::HashSet;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use scribe_core::ports::{AuthError, TokenClaims, TokenService};

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

/// Wire format of the claims segment.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user_id
    email: String,
}

/// JWT-based token service.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = false;
        validation.validate_aud = false;

        Self {
            encoding_key,
            decoding_key,
            validation,
        }
    }
}

impl TokenService for JwtTokenService {
    fn generate_token(&self, user_id: Uuid, email: &str) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        if token.split('.').count() != 3 {
            return Err(AuthError::InvalidToken(
                "expected three dot-separated segments".to_string(),
            ));
        }

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                    ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
                        AuthError::MalformedPayload(e.to_string())
                    }
                    _ => AuthError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(TokenClaims {
            subject: token_data.claims.sub,
            email: token_data.claims.email,
        })
    }
}
