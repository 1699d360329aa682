//! Authentication for Libris.
//!
//! This crate provides the credential side of the API: salted password
//! digests, signed bearer tokens with a fixed 24-hour expiry, and the
//! user account service (registration and login) over the flat-file
//! record store.

mod accounts;
mod error;
pub mod password;
mod token;
mod user;

pub use accounts::{Accounts, LoginRequest, RegisterRequest};
pub use error::AuthError;
pub use token::{Claims, TokenService, TOKEN_TTL_HOURS};
pub use user::{PublicUser, User};

/// Result type for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;
