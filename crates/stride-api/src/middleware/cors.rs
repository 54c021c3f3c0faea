//! CORS handling.
//!
//! Ordinary routes use a `tower-http` [`CorsLayer`]. The sweep trigger
//! answers `OPTIONS` itself, so it gets [`trigger_cors_headers`] instead,
//! which stamps the same configuration onto every response.

use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method};
use axum::middleware::Next;
use axum::response::Response;
use tower_http::cors::{Any, CorsLayer};

use stride_core::config::CorsConfig;

use crate::state::AppState;

fn allows_any(values: &[String]) -> bool {
    values.iter().any(|v| v == "*")
}

/// Builds a CORS tower layer from configuration.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    if allows_any(&config.allowed_origins) {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    layer = layer.allow_methods(methods);

    if allows_any(&config.allowed_headers) {
        layer = layer.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        layer = layer.allow_headers(headers);
    }

    layer.max_age(Duration::from_secs(config.max_age_seconds))
}

/// `Access-Control-Allow-Origin` for a request, if it is allowed at all.
fn allow_origin(config: &CorsConfig, request_headers: &HeaderMap) -> Option<HeaderValue> {
    if allows_any(&config.allowed_origins) {
        return Some(HeaderValue::from_static("*"));
    }
    let origin = request_headers.get(ORIGIN)?;
    let origin_str = origin.to_str().ok()?;
    config
        .allowed_origins
        .iter()
        .any(|o| o == origin_str)
        .then(|| origin.clone())
}

/// `Access-Control-Allow-Headers` as a comma-separated list.
fn allow_headers(config: &CorsConfig) -> Option<HeaderValue> {
    HeaderValue::from_str(&config.allowed_headers.join(", ")).ok()
}

/// Adds the configured CORS headers to every response of the wrapped routes.
pub async fn trigger_cors_headers(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let cors = &state.config.server.cors;
    let origin = allow_origin(cors, request.headers());

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    if let Some(origin) = origin {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    }
    if let Some(allowed) = allow_headers(cors) {
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, allowed);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allow_headers() {
        let value = allow_headers(&CorsConfig::default()).unwrap();
        assert_eq!(value, "authorization, x-client-info, apikey, content-type");
    }

    #[test]
    fn test_allow_origin_wildcard() {
        let value = allow_origin(&CorsConfig::default(), &HeaderMap::new());
        assert_eq!(value, Some(HeaderValue::from_static("*")));
    }

    #[test]
    fn test_allow_origin_from_list() {
        let config = CorsConfig {
            allowed_origins: vec!["https://app.example.com".to_string()],
            ..Default::default()
        };
        let mut headers = HeaderMap::new();
        headers.insert(ORIGIN, HeaderValue::from_static("https://app.example.com"));
        assert_eq!(
            allow_origin(&config, &headers),
            Some(HeaderValue::from_static("https://app.example.com"))
        );

        headers.insert(ORIGIN, HeaderValue::from_static("https://evil.example.com"));
        assert_eq!(allow_origin(&config, &headers), None);
        assert_eq!(allow_origin(&config, &HeaderMap::new()), None);
    }
}
