//! JWT claims structure
//!
//! Tokens are issued by an external identity provider; this crate only
//! decodes and validates them. Claims carry the caller's id, role, and
//! (for property admins) the property they administer.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use stayhub_core::{traits::Scope, AppError};
use uuid::Uuid;

/// Role carried in a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular guest; may only act on their own bookings
    Guest,
    /// Admin confined to a single property
    PropertyAdmin,
    /// Unrestricted admin
    GlobalAdmin,
}

impl Role {
    /// Whether this role grants any administrative access
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::PropertyAdmin | Role::GlobalAdmin)
    }
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject: the caller's id as a UUID string
    pub sub: String,

    /// Caller role
    pub role: Role,

    /// Property a property admin is confined to; absent for guests and
    /// global admins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<Uuid>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create new claims with the given expiration duration
    pub fn new(subject: Uuid, role: Role, property_id: Option<Uuid>, expires_in_secs: i64) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.to_string(),
            role,
            property_id,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expires_in_secs)).timestamp(),
        }
    }

    /// Check if the claims have expired
    pub fn is_expired(&self) -> bool {
        self.exp < Utc::now().timestamp()
    }

    /// Parse the subject as the caller's id
    pub fn subject_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::InvalidToken("Token subject is not a valid id".to_string()))
    }

    /// Resolve the administrative scope these claims grant.
    ///
    /// Guests have no admin scope. Property admins must carry a property
    /// id; a token missing one is rejected as invalid rather than being
    /// silently widened to global access.
    pub fn admin_scope(&self) -> Result<Scope, AppError> {
        match self.role {
            Role::GlobalAdmin => Ok(Scope::Global),
            Role::PropertyAdmin => self
                .property_id
                .map(Scope::Property)
                .ok_or_else(|| {
                    AppError::InvalidToken(
                        "Property admin token missing property id".to_string(),
                    )
                }),
            Role::Guest => Err(AppError::Forbidden),
        }
    }
}
