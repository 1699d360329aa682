//! Registration and login handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use libris_auth::{LoginRequest, RegisterRequest};

use crate::api::{ApiError, AppState};

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.accounts.register(req).await?;
    let token = state.tokens.issue(&user)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully",
            "token": token,
            "user": user.to_public(),
        })),
    ))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.accounts.login(req).await?;
    let token = state.tokens.issue(&user)?;

    Ok(Json(json!({
        "message": "Login successful",
        "token": token,
        "user": user.to_public(),
    })))
}
