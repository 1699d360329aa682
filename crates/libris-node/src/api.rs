//! HTTP API for the Libris node.
//!
//! Routing, shared state, and the error-to-response mapping. Every
//! error body is `{"error": <message>}`; internal failures are
//! additionally redacted outside development mode.

use axum::{
    http::{HeaderValue, Method, StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use libris_auth::{Accounts, AuthError, TokenService};
use libris_catalog::{Catalog, CatalogError};
use libris_store::RecordStore;

use crate::config::Config;
use crate::rate_limit::FixedWindowLimiter;
use crate::{auth_api, books_api};

/// Whether internal error details are echoed to clients.
static DEV_MODE: AtomicBool = AtomicBool::new(false);

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Account registration and login.
    pub accounts: Accounts,
    /// Book collection operations.
    pub catalog: Catalog,
    /// Bearer token issuance and verification.
    pub tokens: Arc<TokenService>,
    /// Per-client request limiter.
    pub limiter: Arc<FixedWindowLimiter>,
    /// Allowed CORS origins.
    pub cors_origins: Vec<String>,
}

impl AppState {
    /// Builds the full application state over `store`.
    pub fn new(store: Arc<dyn RecordStore>, config: &Config) -> Self {
        DEV_MODE.store(config.development, Ordering::Relaxed);
        Self {
            accounts: Accounts::new(store.clone()),
            catalog: Catalog::new(store),
            tokens: Arc::new(TokenService::new(&config.jwt_secret)),
            limiter: Arc::new(FixedWindowLimiter::new(
                config.rate_limit_window,
                config.rate_limit_max,
            )),
            cors_origins: config.cors_origins.clone(),
        }
    }
}

/// API error type.
///
/// Each variant carries the client-facing message; the variant picks
/// the status code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let ApiError::Internal(detail) = &self {
            tracing::error!(error = %detail, "Internal error");
            let message = if DEV_MODE.load(Ordering::Relaxed) {
                detail.clone()
            } else {
                "Something went wrong".to_string()
            };
            let body = json!({ "error": "Internal server error", "message": message });
            return (status, Json(body)).into_response();
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials | AuthError::WeakPassword | AuthError::InvalidEmail => {
                ApiError::Validation(err.to_string())
            }
            AuthError::EmailExists => ApiError::Conflict(err.to_string()),
            AuthError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AuthError::TokenExpired | AuthError::InvalidToken => {
                ApiError::Forbidden("Invalid or expired token".to_string())
            }
            AuthError::Crypto(_) | AuthError::Store(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound => ApiError::NotFound(err.to_string()),
            CatalogError::NotOwnerUpdate | CatalogError::NotOwnerDelete => {
                ApiError::Forbidden(err.to_string())
            }
            CatalogError::MissingFields
            | CatalogError::InvalidYear
            | CatalogError::MissingGenre => ApiError::Validation(err.to_string()),
            CatalogError::Store(_) => ApiError::Internal(err.to_string()),
        }
    }
}

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origins);

    Router::new()
        // Health check
        .route("/api/health", get(health))
        // Accounts
        .route("/api/auth/register", post(auth_api::register))
        .route("/api/auth/login", post(auth_api::login))
        // Books
        .route("/api/books", get(books_api::list).post(books_api::create))
        .route("/api/books/search", get(books_api::search_by_genre))
        .route(
            "/api/books/{id}",
            get(books_api::get)
                .put(books_api::update)
                .delete(books_api::delete),
        )
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::rate_limit::limit,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

/// Health check endpoint.
async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "OK",
        "message": "Bookstore API is running",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

/// Catch-all for unknown routes: a directory of what does exist.
async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Endpoint not found",
            "message": format!("Cannot {} {}", method, uri.path()),
            "availableEndpoints": {
                "auth": ["POST /api/auth/register", "POST /api/auth/login"],
                "books": [
                    "GET /api/books",
                    "GET /api/books/:id",
                    "POST /api/books",
                    "PUT /api/books/:id",
                    "DELETE /api/books/:id",
                    "GET /api/books/search?genre=<genre>",
                ],
                "health": ["GET /api/health"],
            },
        })),
    )
}
