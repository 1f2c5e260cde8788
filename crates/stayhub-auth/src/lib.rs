//! Authentication and authorization for StayHub
//!
//! JWT bearer-token validation and Actix-web request extractors. Token
//! issuance lives with the external identity provider; this crate decodes
//! tokens, validates them against the shared secret, and resolves admin
//! claims into an explicit access scope.

pub mod claims;
pub mod jwt;
pub mod middleware;

pub use claims::{Claims, Role};
pub use jwt::JwtService;
pub use middleware::{AdminUser, AuthenticatedGuest};
