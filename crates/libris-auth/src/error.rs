//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
///
/// The display strings double as the client-facing error messages, so
/// changing them is an API change. `TokenExpired` and `InvalidToken`
/// are kept distinct so the guard can log which occurred, even though
/// both map to the same rejection.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password missing from the request.
    #[error("Email and password are required")]
    MissingCredentials,

    /// Password shorter than the minimum length.
    #[error("Password must be at least 6 characters long")]
    WeakPassword,

    /// Email failed format validation.
    #[error("Please provide a valid email address")]
    InvalidEmail,

    /// A user with this email is already registered.
    #[error("User with this email already exists")]
    EmailExists,

    /// Unknown email or wrong password. One variant for both cases so
    /// responses cannot leak which emails are registered.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Bearer token past its expiry.
    #[error("token expired")]
    TokenExpired,

    /// Bearer token with a bad signature or format.
    #[error("invalid token")]
    InvalidToken,

    /// Hashing or signing failure.
    #[error("crypto error: {0}")]
    Crypto(String),

    /// Underlying store failure.
    #[error("store error: {0}")]
    Store(#[from] libris_store::StoreError),
}
