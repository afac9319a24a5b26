use thiserror::Error;

use crate::claims::TokenValidationError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("unknown session token")]
    UnknownSession,

    #[error("session store unavailable")]
    SessionStoreUnavailable,

    #[error(transparent)]
    Token(#[from] TokenValidationError),
}

/// The single account allowed through the login gate.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Exact, case-sensitive comparison of both fields.
    pub fn verify(&self, username: &str, password: &str) -> Result<(), AuthError> {
        if self.username == username && self.password == password {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
