//! Admin authorization for job write routes.
//!
//! Tokens are issued by the separate auth service; this module only verifies them.

pub mod extractors;
pub mod middleware;
pub mod token;

pub use extractors::AdminClaims;
pub use middleware::AdminAuth;
pub use token::{verify_token, Claims, ADMIN_ROLE};

/// Secret shared with the token issuer, registered as app data.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
        }
    }
}
