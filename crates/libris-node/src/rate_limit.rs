//! Per-client fixed-window rate limiting.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use parking_lot::Mutex;
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use crate::api::AppState;

const LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";

struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window request counter keyed by client address.
///
/// Counts reset at window boundaries rather than sliding, so a client
/// can burst up to twice the limit across a boundary. Same trade-off
/// as the counter this replaces; cheap and good enough here.
pub struct FixedWindowLimiter {
    window: Duration,
    max: u32,
    buckets: Mutex<HashMap<String, Window>>,
}

impl FixedWindowLimiter {
    pub fn new(window: Duration, max: u32) -> Self {
        Self {
            window,
            max,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Records a request from `key` and reports whether it is within
    /// the current window's budget.
    pub fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut buckets = self.buckets.lock();
        let window = buckets.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(window.started) >= self.window {
            window.started = now;
            window.count = 0;
        }

        window.count += 1;
        window.count <= self.max
    }
}

/// Middleware applying the limiter to every request.
pub async fn limit(State(state): State<AppState>, req: Request, next: Next) -> Response {
    // Peer address when served over a socket; a fixed key otherwise
    // (tests drive the router in-process).
    let key = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    if !state.limiter.check(&key) {
        tracing::warn!(client = %key, "Rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": LIMIT_MESSAGE })),
        )
            .into_response();
    }

    next.run(req).await
}
