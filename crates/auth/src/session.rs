//! Opaque session tokens and their in-memory registry.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::claims::{SessionClaims, validate_claims};
use crate::credentials::AuthError;

/// Bearer token handed out at login.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(Uuid);

impl SessionToken {
    /// Create a new token (UUIDv7).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for SessionToken {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::str::FromStr for SessionToken {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self).map_err(|_| AuthError::UnknownSession)
    }
}

/// Session registry abstraction.
pub trait SessionStore: Send + Sync {
    /// Start a session for `sub` valid for `ttl` from `now`.
    ///
    /// A token is only returned once it has been recorded.
    fn issue(&self, sub: &str, now: DateTime<Utc>, ttl: Duration) -> Result<(SessionToken, SessionClaims), AuthError>;

    /// Look up a token and check it is still valid at `now`.
    ///
    /// Expired sessions are dropped from the store as a side effect.
    fn resolve(&self, token: &SessionToken, now: DateTime<Utc>) -> Result<SessionClaims, AuthError>;

    /// End a session. Returns whether it existed.
    fn revoke(&self, token: &SessionToken) -> bool;
}

impl<S> SessionStore for Arc<S>
where
    S: SessionStore + ?Sized,
{
    fn issue(&self, sub: &str, now: DateTime<Utc>, ttl: Duration) -> Result<(SessionToken, SessionClaims), AuthError> {
        (**self).issue(sub, now, ttl)
    }

    fn resolve(&self, token: &SessionToken, now: DateTime<Utc>) -> Result<SessionClaims, AuthError> {
        (**self).resolve(token, now)
    }

    fn revoke(&self, token: &SessionToken) -> bool {
        (**self).revoke(token)
    }
}

/// In-memory session store. Sessions do not survive a restart.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    inner: RwLock<HashMap<SessionToken, SessionClaims>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for InMemorySessionStore {
    fn issue(&self, sub: &str, now: DateTime<Utc>, ttl: Duration) -> Result<(SessionToken, SessionClaims), AuthError> {
        let token = SessionToken::new();
        let claims = SessionClaims::new(sub, now, ttl);
        {
            let mut map = self.inner.write().map_err(|_| AuthError::SessionStoreUnavailable)?;
            // Drop sessions that have already expired.
            map.retain(|_, c| c.expires_at > now);
            map.insert(token, claims.clone());
        }
        tracing::debug!(sub, %token, "session issued");
        Ok((token, claims))
    }

    fn resolve(&self, token: &SessionToken, now: DateTime<Utc>) -> Result<SessionClaims, AuthError> {
        let claims = {
            let map = self.inner.read().map_err(|_| AuthError::UnknownSession)?;
            map.get(token).cloned().ok_or(AuthError::UnknownSession)?
        };

        if let Err(e) = validate_claims(&claims, now) {
            self.revoke(token);
            return Err(e.into());
        }
        Ok(claims)
    }

    fn revoke(&self, token: &SessionToken) -> bool {
        match self.inner.write() {
            Ok(mut map) => map.remove(token).is_some(),
            Err(_) => false,
        }
    }
}
