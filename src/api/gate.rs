//! Request gating shared by the API handlers
//!
//! Every response built here carries the CORS header set; OPTIONS
//! preflights short-circuit before any other processing. Rejection bodies
//! stay generic, the interesting detail goes to the server log.

use axum::{
    Json,
    http::{HeaderMap, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

/// Allowed methods advertised by the ingest endpoint
pub const INGEST_METHODS: &str = "POST, OPTIONS";

/// Allowed methods advertised by the query endpoint
pub const QUERY_METHODS: &str = "GET, OPTIONS";

const ALLOWED_HEADERS: &str = "Content-Type, Authorization, X-API-Token";

type CorsHeaders = [(&'static str, &'static str); 4];

fn cors_headers(allow_methods: &'static str) -> CorsHeaders {
    [
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Methods", allow_methods),
        ("Access-Control-Allow-Headers", ALLOWED_HEADERS),
        ("Cache-Control", "no-store"),
    ]
}

/// Short-circuits CORS preflight requests with an empty 204
pub fn preflight(method: &Method, allow_methods: &'static str) -> Option<Response> {
    if *method != Method::OPTIONS {
        return None;
    }
    Some((StatusCode::NO_CONTENT, cors_headers(allow_methods)).into_response())
}

/// Rejects requests whose verb does not match the endpoint
pub fn require_method(
    method: &Method,
    expected: Method,
    allow_methods: &'static str,
) -> Option<Response> {
    if *method == expected {
        return None;
    }
    Some(reject(
        StatusCode::METHOD_NOT_ALLOWED,
        allow_methods,
        "method not allowed",
        &format!("only {expected} requests are supported"),
    ))
}

/// Rejects requests that do not carry the configured API token.
///
/// The token is read from `Authorization: Bearer <token>` or `X-API-Token`
/// and compared for exact equality. Why the check failed is not disclosed.
pub fn require_token(
    headers: &HeaderMap,
    expected: &str,
    allow_methods: &'static str,
) -> Option<Response> {
    if client_token(headers) == Some(expected) {
        return None;
    }
    Some(reject(
        StatusCode::UNAUTHORIZED,
        allow_methods,
        "unauthorized",
        "provide a valid API token",
    ))
}

fn client_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(token) = value.strip_prefix("Bearer ") {
            return Some(token);
        }
    }
    headers.get("x-api-token").and_then(|v| v.to_str().ok())
}

/// 400 with a generic message
pub fn bad_request(allow_methods: &'static str) -> Response {
    reject(
        StatusCode::BAD_REQUEST,
        allow_methods,
        "invalid payload",
        "check the heart_rate and location values",
    )
}

/// 500 with a generic message
pub fn internal_error(allow_methods: &'static str) -> Response {
    reject(
        StatusCode::INTERNAL_SERVER_ERROR,
        allow_methods,
        "server error",
        "request could not be processed, try again later",
    )
}

/// 200 with the CORS header set
pub fn ok_json<T: Serialize>(allow_methods: &'static str, body: T) -> Response {
    (StatusCode::OK, cors_headers(allow_methods), Json(body)).into_response()
}

fn reject(
    status: StatusCode,
    allow_methods: &'static str,
    error: &str,
    message: &str,
) -> Response {
    (
        status,
        cors_headers(allow_methods),
        Json(json!({ "error": error, "message": message })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_preflight_short_circuits_options() {
        let response = preflight(&Method::OPTIONS, INGEST_METHODS).unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            response.headers().get("access-control-allow-methods").unwrap(),
            "POST, OPTIONS"
        );
    }

    #[test]
    fn test_preflight_passes_other_methods() {
        assert!(preflight(&Method::POST, INGEST_METHODS).is_none());
        assert!(preflight(&Method::GET, QUERY_METHODS).is_none());
    }

    #[test]
    fn test_require_method_rejects_mismatch() {
        let response = require_method(&Method::GET, Method::POST, INGEST_METHODS).unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(require_method(&Method::POST, Method::POST, INGEST_METHODS).is_none());
    }

    #[test]
    fn test_client_token_from_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer secret-1"),
        );
        assert_eq!(client_token(&headers), Some("secret-1"));
    }

    #[test]
    fn test_client_token_from_api_token_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-token", HeaderValue::from_static("secret-2"));
        assert_eq!(client_token(&headers), Some("secret-2"));
    }

    #[test]
    fn test_client_token_missing() {
        assert_eq!(client_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_require_token_exact_equality() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-token", HeaderValue::from_static("secret"));
        assert!(require_token(&headers, "secret", QUERY_METHODS).is_none());

        let denied = require_token(&headers, "secret-but-longer", QUERY_METHODS).unwrap();
        assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_rejections_carry_cors_headers() {
        let response = internal_error(QUERY_METHODS);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        assert_eq!(response.headers().get("cache-control").unwrap(), "no-store");
    }
}
