//! Auth Module
//!
//! Credential and role storage, login sessions, and the role-based
//! authorization gate applied to Admin-only endpoints.

mod directory;
mod gate;
mod password;
mod sessions;
mod user_tables;
mod validation;

use thiserror::Error;

use crate::store::StoreError;

pub use directory::UserDirectory;
pub use gate::{authorize, Denial, Identity, Policy, ADMIN_POLICY};
pub use password::{hash_password_async, verify_password_async};
pub use sessions::{Session, SessionStore, DEFAULT_SESSION_TTL};
pub use validation::IdentityError;

/// The only role this service enforces.
pub const ADMIN_ROLE: &str = "Admin";

/// Roles ensured by `POST /api/auth/create-role`.
pub const KNOWN_ROLES: &[&str] = &[ADMIN_ROLE];

// == Auth Error ==
#[derive(Error, Debug)]
pub enum AuthError {
    /// User creation or role assignment rejected
    #[error("validation failed")]
    Validation(Vec<IdentityError>),

    /// Unknown user or wrong password
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Hashing backend failure or corrupt stored hash
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// The user tables could not be read or written
    #[error(transparent)]
    Store(#[from] StoreError),
}
