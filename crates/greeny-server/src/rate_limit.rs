//! Per-client fixed-window rate limiting.

use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;
use tracing::warn;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window request counter keyed by client IP.
///
/// Clients are identified by their socket peer address. `X-Forwarded-For`
/// is only consulted when the server sits behind a trusted proxy.
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    trust_proxy: bool,
    clients: DashMap<IpAddr, Window>,
    last_sweep: Mutex<Instant>,
}

impl RateLimiter {
    /// Allow `max_requests` per client in every `window`.
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            trust_proxy: false,
            clients: DashMap::new(),
            last_sweep: Mutex::new(Instant::now()),
        }
    }

    /// Identify clients by the first `X-Forwarded-For` hop when present.
    pub fn with_trusted_proxy(mut self, trust_proxy: bool) -> Self {
        self.trust_proxy = trust_proxy;
        self
    }

    /// Whether `X-Forwarded-For` is honoured.
    pub fn trusts_proxy(&self) -> bool {
        self.trust_proxy
    }

    /// Count one request from `client` at `now`.
    ///
    /// Returns the time until the window resets when the client is over
    /// its limit.
    pub fn check(&self, client: IpAddr, now: Instant) -> Result<(), Duration> {
        self.sweep(now);

        let mut entry = self.clients.entry(client).or_insert(Window {
            started: now,
            count: 0,
        });
        let window = entry.value_mut();

        if now.duration_since(window.started) >= self.window {
            *window = Window {
                started: now,
                count: 0,
            };
        }

        if window.count >= self.max_requests {
            let elapsed = now.duration_since(window.started);
            return Err(self.window.saturating_sub(elapsed));
        }

        window.count += 1;
        Ok(())
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }

    /// Drops expired windows, at most once per window length.
    fn sweep(&self, now: Instant) {
        // Another request is already sweeping.
        let Ok(mut last_sweep) = self.last_sweep.try_lock() else {
            return;
        };
        if now.saturating_duration_since(*last_sweep) < self.window {
            return;
        }
        *last_sweep = now;
        drop(last_sweep);

        self.clients
            .retain(|_, window| now.saturating_duration_since(window.started) < self.window);
    }
}

/// Client identity.
///
/// The peer address, or with `trust_proxy` the first `X-Forwarded-For` hop
/// falling back to the peer address.
pub fn client_ip(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_proxy: bool,
) -> Option<IpAddr> {
    let forwarded = || {
        headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .and_then(|hop| hop.trim().parse().ok())
    };

    trust_proxy
        .then(forwarded)
        .flatten()
        .or_else(|| peer.map(|addr| addr.ip()))
}

/// Middleware applying the limiter to every request it wraps.
pub async fn limit_by_ip(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let client = client_ip(request.headers(), peer, limiter.trusts_proxy())
        .unwrap_or(IpAddr::from([0, 0, 0, 0]));

    match limiter.check(client, Instant::now()) {
        Ok(()) => next.run(request).await,
        Err(retry_after) => {
            warn!(%client, ?retry_after, "Rate limit exceeded");
            ApiError::RateLimited(retry_after).into_response()
        }
    }
}
