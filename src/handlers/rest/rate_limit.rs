//! Per-client request limiting.
//!
//! Fixed windows keyed by peer IP: each client may make `max_requests`
//! requests per window, after which it gets 429 until the window rolls
//! over. Requests without a known peer address share one window.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tokio::sync::Mutex;
use tracing::debug;

use super::error::ApiError;
use crate::config::RateLimitConfig;

/// Tracked clients beyond which expired windows are swept.
const SWEEP_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window limiter shared by every request.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    clients: Mutex<HashMap<Option<IpAddr>, Window>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// `None` when limiting is switched off (`max_requests: 0`).
    pub fn from_config(config: &RateLimitConfig) -> Option<Self> {
        (config.max_requests > 0)
            .then(|| Self::new(config.max_requests, Duration::from_secs(config.window_secs)))
    }

    /// Count a request from `client`; false once the client is over its limit.
    pub async fn try_acquire(&self, client: Option<IpAddr>) -> bool {
        let now = Instant::now();
        let mut clients = self.clients.lock().await;

        if clients.len() >= SWEEP_THRESHOLD {
            clients.retain(|_, w| now.duration_since(w.started) < self.window);
        }

        let window = clients.entry(client).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(window.started) >= self.window {
            *window = Window {
                started: now,
                count: 0,
            };
        }

        if window.count >= self.max_requests {
            return false;
        }
        window.count += 1;
        true
    }
}

/// Middleware rejecting requests from clients over their limit.
pub async fn enforce(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    if !limiter.try_acquire(client).await {
        debug!(client = ?client, "rate limit exceeded");
        return ApiError::TooManyRequests.into_response();
    }

    next.run(request).await
}
