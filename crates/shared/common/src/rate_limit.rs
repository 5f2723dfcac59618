//! Fixed-window rate limiting middleware backed by Redis.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderName, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

use crate::cache::Cache;
use crate::config::RateLimitConfig;

const HEADER_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const HEADER_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
const HEADER_RETRY_AFTER: HeaderName = HeaderName::from_static("retry-after");

/// Middleware state: the cache plus the window configuration.
#[derive(Clone)]
pub struct RateLimiter {
    cache: Arc<Cache>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(cache: Arc<Cache>, config: RateLimitConfig) -> Self {
        Self { cache, config }
    }
}

/// Rate limit per request path and client IP.
///
/// Fails closed: a cache error rejects the request.
pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let RateLimitConfig {
        max_requests,
        window_seconds,
    } = limiter.config;

    let ip = client_ip(request.headers(), connect_info);
    let identifier = format!("{}:{}", request.uri().path(), ip);

    let count = match limiter
        .cache
        .check_rate_limit(&identifier, max_requests, window_seconds)
        .await
    {
        Ok((count, true)) => count,
        Ok((_, false)) => {
            let remaining = match limiter.cache.get_rate_limit_ttl(&identifier).await {
                Ok(ttl) => ttl,
                Err(e) => {
                    warn!("Rate limit TTL lookup failed for {}: {}", identifier, e);
                    None
                }
            };
            return rate_limit_exceeded_response(
                max_requests,
                retry_after_seconds(remaining, window_seconds),
            );
        }
        Err(e) => {
            warn!("Rate limit check failed for {}: {}", identifier, e);
            return rate_limit_exceeded_response(max_requests, window_seconds);
        }
    };

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(HEADER_LIMIT, HeaderValue::from(max_requests));
    headers.insert(
        HEADER_REMAINING,
        HeaderValue::from(max_requests.saturating_sub(count)),
    );

    response
}

/// Client address: `X-Forwarded-For`, then `X-Real-IP`, then the socket.
pub fn client_ip(headers: &HeaderMap, connect_info: Option<ConnectInfo<SocketAddr>>) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());
    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|h| h.to_str().ok()) {
        return real_ip.trim().to_string();
    }

    connect_info
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Seconds until the window reopens, or the full window when the key has no TTL.
fn retry_after_seconds(ttl: Option<i64>, window_seconds: u64) -> u64 {
    ttl.and_then(|ttl| u64::try_from(ttl).ok())
        .filter(|&secs| secs > 0)
        .map_or(window_seconds, |secs| secs.min(window_seconds))
}

fn rate_limit_exceeded_response(max_requests: u64, retry_after: u64) -> Response {
    let body = json!({
        "error": {
            "code": "TOO_MANY_REQUESTS",
            "message": "Too many requests. Please try again later."
        }
    });
    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();

    let headers = response.headers_mut();
    headers.insert(HEADER_RETRY_AFTER, HeaderValue::from(retry_after));
    headers.insert(HEADER_REMAINING, HeaderValue::from(0u64));
    headers.insert(HEADER_LIMIT, HeaderValue::from(max_requests));

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_ip_prefers_forwarded_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("10.0.0.1, 10.0.0.2"));
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.9"));
        assert_eq!(client_ip(&headers, None), "10.0.0.1");
    }

    #[test]
    fn test_client_ip_falls_back_to_socket() {
        let headers = HeaderMap::new();
        let addr: SocketAddr = "192.168.1.5:4000".parse().unwrap();
        assert_eq!(client_ip(&headers, Some(ConnectInfo(addr))), "192.168.1.5");
        assert_eq!(client_ip(&headers, None), "unknown");
    }

    #[test]
    fn test_retry_after_uses_time_left_in_window() {
        assert_eq!(retry_after_seconds(Some(12), 60), 12);
        assert_eq!(retry_after_seconds(None, 60), 60);
        assert_eq!(retry_after_seconds(Some(0), 60), 60);
        assert_eq!(retry_after_seconds(Some(-1), 60), 60);
        assert_eq!(retry_after_seconds(Some(500), 60), 60);
    }

    #[test]
    fn test_exceeded_response_headers() {
        let response = rate_limit_exceeded_response(5, 60);
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[HEADER_RETRY_AFTER], "60");
        assert_eq!(response.headers()[HEADER_REMAINING], "0");
        assert_eq!(response.headers()[HEADER_LIMIT], "5");
    }
}
