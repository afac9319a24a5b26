use chrono::{DateTime, Utc};

use sexyboom_auth::{SessionClaims, SessionToken};

/// Session context for a request.
///
/// Inserted by the auth middleware; present on every protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    token: SessionToken,
    username: String,
    expires_at: DateTime<Utc>,
}

impl SessionContext {
    pub fn new(token: SessionToken, claims: SessionClaims) -> Self {
        Self {
            token,
            username: claims.sub,
            expires_at: claims.expires_at,
        }
    }

    pub fn token(&self) -> SessionToken {
        self.token
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}
