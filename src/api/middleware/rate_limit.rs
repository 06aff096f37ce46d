//! Rate limiting middleware using Redis cache.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;

use crate::api::AppState;
use crate::config::{
    RATE_LIMIT_AUTH_REQUESTS, RATE_LIMIT_AUTH_WINDOW_SECONDS, RATE_LIMIT_REQUESTS,
    RATE_LIMIT_WINDOW_SECONDS,
};

const RATE_LIMIT_LIMIT_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const RATE_LIMIT_REMAINING_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// Rate limit error response
#[derive(Debug)]
pub struct RateLimitError {
    pub retry_after: u64,
}

impl IntoResponse for RateLimitError {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert(axum::http::header::RETRY_AFTER, HeaderValue::from(self.retry_after));
        headers.insert(RATE_LIMIT_REMAINING_HEADER, HeaderValue::from_static("0"));

        (
            StatusCode::TOO_MANY_REQUESTS,
            headers,
            "Too many requests. Please try again later.",
        )
            .into_response()
    }
}

/// Limits applied to one group of routes
#[derive(Debug, Clone, Copy)]
struct Policy {
    scope: &'static str,
    max_requests: u64,
    window_seconds: u64,
}

const GENERAL: Policy = Policy {
    scope: "general",
    max_requests: RATE_LIMIT_REQUESTS,
    window_seconds: RATE_LIMIT_WINDOW_SECONDS,
};

const AUTH: Policy = Policy {
    scope: "auth",
    max_requests: RATE_LIMIT_AUTH_REQUESTS,
    window_seconds: RATE_LIMIT_AUTH_WINDOW_SECONDS,
};

/// Extract client identifier for rate limiting.
///
/// Forwarded headers are only read when the deployment says a trusted
/// proxy sets them; any client can send them otherwise.
fn get_client_identifier(request: &Request, trust_proxy_headers: bool) -> String {
    if trust_proxy_headers {
        // First entry of the chain is the original client
        if let Some(ip) = request
            .headers()
            .get("X-Forwarded-For")
            .and_then(|h| h.to_str().ok())
            .and_then(|forwarded| forwarded.split(',').next())
        {
            return ip.trim().to_string();
        }

        if let Some(real_ip) = request
            .headers()
            .get("X-Real-IP")
            .and_then(|h| h.to_str().ok())
        {
            return real_ip.trim().to_string();
        }
    }

    if let Some(connect_info) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return connect_info.0.ip().to_string();
    }

    "unknown".to_string()
}

async fn enforce(
    state: AppState,
    policy: Policy,
    request: Request,
    next: Next,
) -> Result<Response, RateLimitError> {
    let Some(cache) = state.cache.as_ref() else {
        return Ok(next.run(request).await);
    };

    let client_id = get_client_identifier(&request, state.config.trust_proxy_headers);
    let key = format!("{}:{}", policy.scope, client_id);

    let decision = match cache
        .check_rate_limit(&key, policy.max_requests, policy.window_seconds)
        .await
    {
        Ok(decision) => decision,
        Err(e) => {
            // Fail closed: an unreachable Redis must not lift the limit
            tracing::error!(
                error = %e,
                scope = policy.scope,
                "Rate limit check failed - denying request"
            );
            return Err(RateLimitError {
                retry_after: policy.window_seconds,
            });
        }
    };

    if !decision.allowed {
        tracing::warn!(
            client = %client_id,
            scope = policy.scope,
            count = decision.count,
            "Rate limit exceeded"
        );
        return Err(RateLimitError {
            retry_after: policy.window_seconds,
        });
    }

    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(RATE_LIMIT_LIMIT_HEADER, HeaderValue::from(policy.max_requests));
    headers.insert(
        RATE_LIMIT_REMAINING_HEADER,
        HeaderValue::from(decision.remaining(policy.max_requests)),
    );

    Ok(response)
}

/// General rate limiting middleware.
/// Limits requests to RATE_LIMIT_REQUESTS per RATE_LIMIT_WINDOW_SECONDS.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, RateLimitError> {
    enforce(state, GENERAL, request, next).await
}

/// Stricter rate limiting for authentication endpoints.
/// Limits requests to RATE_LIMIT_AUTH_REQUESTS per RATE_LIMIT_AUTH_WINDOW_SECONDS.
pub async fn rate_limit_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, RateLimitError> {
    enforce(state, AUTH, request, next).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_rate_limit_error_response() {
        let error = RateLimitError { retry_after: 60 };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()["retry-after"], "60");
        assert_eq!(response.headers()["x-ratelimit-remaining"], "0");
    }

    fn request_from(peer: &str, headers: &[(&str, &str)]) -> Request {
        let mut builder = Request::builder();
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let mut request = builder.body(Body::empty()).unwrap();
        let addr: SocketAddr = peer.parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(addr));
        request
    }

    #[test]
    fn test_client_identifier_ignores_forwarded_headers_by_default() {
        let request = request_from(
            "198.51.100.4:52000",
            &[("X-Forwarded-For", "203.0.113.7"), ("X-Real-IP", "10.0.0.2")],
        );
        assert_eq!(get_client_identifier(&request, false), "198.51.100.4");

        // rotating the header does not open a new bucket
        let rotated = request_from("198.51.100.4:52001", &[("X-Forwarded-For", "203.0.113.8")]);
        assert_eq!(get_client_identifier(&rotated, false), "198.51.100.4");
    }

    #[test]
    fn test_client_identifier_behind_trusted_proxy() {
        let request = request_from(
            "10.0.0.1:443",
            &[("X-Forwarded-For", "203.0.113.7, 10.0.0.1"), ("X-Real-IP", "10.0.0.2")],
        );
        assert_eq!(get_client_identifier(&request, true), "203.0.113.7");

        let request = request_from("10.0.0.1:443", &[("X-Real-IP", "10.0.0.2")]);
        assert_eq!(get_client_identifier(&request, true), "10.0.0.2");

        let request = request_from("10.0.0.1:443", &[]);
        assert_eq!(get_client_identifier(&request, true), "10.0.0.1");
    }

    #[test]
    fn test_client_identifier_without_peer_address() {
        let request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(get_client_identifier(&request, false), "unknown");
    }
}
