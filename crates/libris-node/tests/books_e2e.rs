//! End-to-end tests for the book collection endpoints.

use axum::{body::Body, http::Request, Router};
use libris_node::api::{create_router, AppState};
use libris_node::config::Config;
use libris_store::MemoryStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn create_test_app() -> Router {
    let config = Config {
        jwt_secret: "test-secret".to_string(),
        ..Config::default()
    };
    create_router(AppState::new(Arc::new(MemoryStore::new()), &config))
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Registers a user and returns their bearer token.
async fn register(app: &Router, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "email": email, "password": "secret1" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    json_body(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

async fn add_book(app: &Router, token: &str, title: &str, genre: &str, year: i64) -> Value {
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/books",
            Some(token),
            Some(json!({
                "title": title,
                "author": "Author",
                "genre": genre,
                "publishedYear": year,
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    json_body(response).await["book"].clone()
}

#[tokio::test]
async fn create_and_fetch_book() {
    let app = create_test_app();
    let token = register(&app, "ada@example.com").await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/books",
            Some(&token),
            Some(json!({
                "title": "  Dune ",
                "author": "Frank Herbert",
                "genre": "Science Fiction",
                "publishedYear": 1965,
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let body = json_body(response).await;
    assert_eq!(body["message"], "Book added successfully");
    assert_eq!(body["book"]["title"], "Dune");
    assert_eq!(body["book"]["publishedYear"], 1965);
    assert!(body["book"]["userId"].is_string());
    let id = body["book"]["id"].as_str().unwrap();

    let response = app
        .oneshot(request("GET", &format!("/api/books/{id}"), Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(json_body(response).await["book"]["title"], "Dune");
}

#[tokio::test]
async fn every_book_route_requires_a_token() {
    let app = create_test_app();

    for (method, uri) in [
        ("GET", "/api/books"),
        ("GET", "/api/books/search?genre=x"),
        ("GET", "/api/books/some-id"),
        ("POST", "/api/books"),
        ("PUT", "/api/books/some-id"),
        ("DELETE", "/api/books/some-id"),
    ] {
        let body = matches!(method, "POST" | "PUT").then(|| json!({}));
        let response = app
            .clone()
            .oneshot(request(method, uri, None, body))
            .await
            .unwrap();
        assert_eq!(response.status(), 401, "{method} {uri}");
        assert_eq!(
            json_body(response).await["error"],
            "Access token is required"
        );
    }
}

#[tokio::test]
async fn garbage_token_is_forbidden() {
    let app = create_test_app();

    let response = app
        .oneshot(request(
            "POST",
            "/api/books",
            Some("not-a-real-token"),
            Some(json!({})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 403);
    assert_eq!(
        json_body(response).await["error"],
        "Invalid or expired token"
    );
}

#[tokio::test]
async fn create_validation() {
    let app = create_test_app();
    let token = register(&app, "ada@example.com").await;

    let missing = json!({ "title": "Dune", "author": "", "genre": "Sci-Fi", "publishedYear": 1965 });
    let response = app
        .clone()
        .oneshot(request("POST", "/api/books", Some(&token), Some(missing)))
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    assert_eq!(
        json_body(response).await["error"],
        "Title, author, genre, and publishedYear are required"
    );

    for year in [json!(3000), json!(-1), json!("1965")] {
        let payload =
            json!({ "title": "Dune", "author": "A", "genre": "Sci-Fi", "publishedYear": year });
        let response = app
            .clone()
            .oneshot(request("POST", "/api/books", Some(&token), Some(payload)))
            .await
            .unwrap();
        assert_eq!(response.status(), 400, "year {year}");
        assert_eq!(
            json_body(response).await["error"],
            "Published year must be a valid year"
        );
    }
}

#[tokio::test]
async fn update_is_owner_only() {
    let app = create_test_app();
    let owner = register(&app, "owner@example.com").await;
    let other = register(&app, "other@example.com").await;

    let book = add_book(&app, &owner, "Dune", "Sci-Fi", 1965).await;
    let id = book["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/api/books/{id}"),
            Some(&other),
            Some(json!({ "title": "Hijacked" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 403);
    assert_eq!(
        json_body(response).await["error"],
        "You can only update books that you added"
    );

    let response = app
        .oneshot(request(
            "PUT",
            &format!("/api/books/{id}"),
            Some(&owner),
            Some(json!({ "title": "Dune Messiah" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body = json_body(response).await;
    assert_eq!(body["message"], "Book updated successfully");
    assert_eq!(body["book"]["title"], "Dune Messiah");
    assert_eq!(body["book"]["publishedYear"], 1965);
}

#[tokio::test]
async fn delete_is_owner_only_and_returns_the_book() {
    let app = create_test_app();
    let owner = register(&app, "owner@example.com").await;
    let other = register(&app, "other@example.com").await;

    let book = add_book(&app, &owner, "Dune", "Sci-Fi", 1965).await;
    let id = book["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(request("DELETE", &format!("/api/books/{id}"), Some(&other), None))
        .await
        .unwrap();
    assert_eq!(response.status(), 403);
    assert_eq!(
        json_body(response).await["error"],
        "You can only delete books that you added"
    );

    let response = app
        .clone()
        .oneshot(request("DELETE", &format!("/api/books/{id}"), Some(&owner), None))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body = json_body(response).await;
    assert_eq!(body["message"], "Book deleted successfully");
    assert_eq!(body["deletedBook"]["title"], "Dune");

    let response = app
        .oneshot(request("GET", &format!("/api/books/{id}"), Some(&owner), None))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    assert_eq!(json_body(response).await["error"], "Book not found");
}

#[tokio::test]
async fn unknown_book_is_not_found_before_ownership() {
    let app = create_test_app();
    let token = register(&app, "ada@example.com").await;

    let response = app
        .oneshot(request(
            "PUT",
            "/api/books/no-such-id",
            Some(&token),
            Some(json!({ "title": "X" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    assert_eq!(json_body(response).await["error"], "Book not found");
}

#[tokio::test]
async fn list_filters_and_paginates() {
    let app = create_test_app();
    let token = register(&app, "ada@example.com").await;

    for i in 0..7 {
        add_book(&app, &token, &format!("Mystery {i}"), "Mystery", 2000).await;
    }
    for i in 0..4 {
        add_book(&app, &token, &format!("Horror {i}"), "Horror", 2001).await;
    }

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            "/api/books?genre=mystery&page=2&limit=3",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body = json_body(response).await;
    assert_eq!(body["books"].as_array().unwrap().len(), 3);
    assert_eq!(body["pagination"]["currentPage"], 2);
    assert_eq!(body["pagination"]["totalPages"], 3);
    assert_eq!(body["pagination"]["totalBooks"], 7);
    assert_eq!(body["pagination"]["hasNextPage"], true);
    assert_eq!(body["pagination"]["hasPrevPage"], true);

    // Free-text search composes with the genre filter.
    let response = app
        .oneshot(request(
            "GET",
            "/api/books?genre=horror&search=horror%200",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["pagination"]["totalBooks"], 1);
    assert_eq!(body["books"][0]["title"], "Horror 0");
}

#[tokio::test]
async fn genre_search_endpoint() {
    let app = create_test_app();
    let token = register(&app, "ada@example.com").await;
    add_book(&app, &token, "Dune", "Science Fiction", 1965).await;
    add_book(&app, &token, "SICP", "Programming", 1985).await;

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            "/api/books/search?genre=fiction",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body = json_body(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["searchTerm"], "fiction");
    assert_eq!(body["books"][0]["title"], "Dune");

    let response = app
        .oneshot(request("GET", "/api/books/search", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    assert_eq!(
        json_body(response).await["error"],
        "Genre parameter is required"
    );
}
