//! `sexyboom-auth`: the login gate.
//!
//! A single configured username/password pair unlocks the application and
//! yields an opaque, expiring session token. This crate is intentionally
//! decoupled from HTTP; the API layer extracts the bearer token and asks the
//! session store to resolve it.

pub mod claims;
pub mod credentials;
pub mod session;

pub use claims::{SessionClaims, TokenValidationError, validate_claims};
pub use credentials::{AuthError, Credentials};
pub use session::{InMemorySessionStore, SessionStore, SessionToken};
