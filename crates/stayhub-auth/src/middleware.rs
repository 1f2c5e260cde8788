//! Actix-web authentication extractors
//!
//! Request extractors that validate the bearer token and expose the
//! caller's identity. Guest endpoints extract [`AuthenticatedGuest`];
//! admin endpoints extract [`AdminUser`], which additionally resolves the
//! caller's administrative scope.

use crate::claims::Claims;
use crate::jwt::JwtService;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use std::sync::Arc;
use stayhub_core::{traits::Scope, AppError};
use tracing::{debug, warn};
use uuid::Uuid;

/// Extract the bearer token from the Authorization header
fn extract_token_from_request(req: &HttpRequest) -> Option<String> {
    let auth_header = req.headers().get("Authorization")?;
    let auth_str = auth_header.to_str().ok()?;
    auth_str.strip_prefix("Bearer ").map(|t| t.to_string())
}

fn validate_request(req: &HttpRequest) -> Result<Claims, AppError> {
    let jwt_service = req
        .app_data::<web::Data<Arc<JwtService>>>()
        .ok_or_else(|| {
            warn!("JwtService not found in app data");
            AppError::Unauthorized("Authentication service not configured".to_string())
        })?;

    let token = extract_token_from_request(req).ok_or_else(|| {
        debug!("No authentication token found in request");
        AppError::Unauthorized("No authentication token provided".to_string())
    })?;

    jwt_service.validate_token(&token)
}

/// Authenticated caller extractor
///
/// Any valid token yields one of these; the subject is the caller's id.
#[derive(Debug, Clone)]
pub struct AuthenticatedGuest {
    /// The caller's id, taken from the token subject
    pub guest_id: Uuid,

    /// Full claims from the token
    pub claims: Claims,
}

impl FromRequest for AuthenticatedGuest {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = validate_request(req).and_then(|claims| {
            let guest_id = claims.subject_id()?;
            debug!(subject = %claims.sub, "Caller authenticated");
            Ok(AuthenticatedGuest { guest_id, claims })
        });

        ready(result)
    }
}

/// Admin extractor
///
/// Requires an admin role; resolves the token into an explicit [`Scope`]
/// so handlers branch exhaustively on global versus property access.
#[derive(Debug, Clone)]
pub struct AdminUser {
    /// The admin's id, taken from the token subject
    pub admin_id: Uuid,

    /// Administrative scope the token grants
    pub scope: Scope,

    /// Full claims from the token
    pub claims: Claims,
}

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = validate_request(req).and_then(|claims| {
            let admin_id = claims.subject_id()?;
            let scope = claims.admin_scope().map_err(|e| {
                warn!(
                    subject = %claims.sub,
                    role = ?claims.role,
                    "Caller attempted admin access without privileges"
                );
                e
            })?;

            debug!(subject = %claims.sub, scope = ?scope, "Admin access granted");
            Ok(AdminUser {
                admin_id,
                scope,
                claims,
            })
        });

        ready(result)
    }
}
