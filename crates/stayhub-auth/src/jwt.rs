//! JWT token validation service
//!
//! Token issuance lives with the external identity provider; the encoding
//! path here exists for tests and tooling. Validation uses the jsonwebtoken
//! crate with the shared HMAC secret from configuration.

use crate::claims::Claims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use stayhub_core::AppError;
use tracing::{debug, warn};

/// JWT validation service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// Create a new JWT service from the shared secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Encode claims into a signed token
    pub fn create_token(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e| {
            warn!(error = %e, "Failed to encode JWT token");
            AppError::InvalidToken(format!("Token creation failed: {}", e))
        })
    }

    /// Validate a token and extract its claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            if matches!(
                e.kind(),
                jsonwebtoken::errors::ErrorKind::ExpiredSignature
            ) {
                warn!("Token expired");
                return AppError::TokenExpired;
            }

            warn!(error = %e, "Invalid token");
            AppError::InvalidToken(format!("Token validation failed: {}", e))
        })?;

        let claims = token_data.claims;

        if claims.is_expired() {
            warn!(subject = %claims.sub, "Token expired");
            return Err(AppError::TokenExpired);
        }

        debug!(subject = %claims.sub, role = ?claims.role, "Token validated");

        Ok(claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
