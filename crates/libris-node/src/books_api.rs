//! Book collection handlers.
//!
//! Every route goes through the bearer token guard; mutations
//! additionally pass the catalog's ownership checks.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use libris_catalog::{CreateBookRequest, ListQuery, UpdateBookRequest};

use crate::api::{ApiError, AppState};
use crate::guard::AuthUser;

#[derive(Debug, Default, Deserialize)]
pub struct GenreQuery {
    #[serde(default)]
    pub genre: Option<String>,
}

/// `GET /api/books`
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state.catalog.list(query).await?;
    Ok(Json(page))
}

/// `GET /api/books/search?genre=<genre>`
pub async fn search_by_genre(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<GenreQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.catalog.search_by_genre(query.genre).await?;
    Ok(Json(result))
}

/// `GET /api/books/{id}`
pub async fn get(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let book = state.catalog.get(&id).await?;
    Ok(Json(json!({ "book": book })))
}

/// `POST /api/books`
pub async fn create(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreateBookRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let book = state.catalog.create(&claims.user_id, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Book added successfully",
            "book": book,
        })),
    ))
}

/// `PUT /api/books/{id}`
pub async fn update(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateBookRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let book = state.catalog.update(&claims.user_id, &id, req).await?;
    Ok(Json(json!({
        "message": "Book updated successfully",
        "book": book,
    })))
}

/// `DELETE /api/books/{id}`
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let book = state.catalog.delete(&claims.user_id, &id).await?;
    Ok(Json(json!({
        "message": "Book deleted successfully",
        "deletedBook": book,
    })))
}
