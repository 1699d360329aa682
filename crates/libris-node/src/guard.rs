//! Bearer token guard for protected routes.

use axum::{extract::FromRequestParts, http::header, http::request::Parts};

use libris_auth::{AuthError, Claims};

use crate::api::{ApiError, AppState};

/// Identity of the authenticated caller, extracted from the
/// `Authorization` header.
///
/// A missing token is 401; a token that fails verification, expired or
/// otherwise, is 403.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // "Bearer <token>": the scheme word is ignored, only the
        // second whitespace-separated field matters.
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split_whitespace().nth(1))
            .ok_or_else(|| ApiError::Unauthorized("Access token is required".to_string()))?;

        match state.tokens.verify(token) {
            Ok(claims) => Ok(AuthUser(claims)),
            Err(err) => {
                let kind = match err {
                    AuthError::TokenExpired => "expired",
                    _ => "invalid",
                };
                tracing::warn!(kind, "Rejected bearer token");
                Err(ApiError::Forbidden("Invalid or expired token".to_string()))
            }
        }
    }
}
