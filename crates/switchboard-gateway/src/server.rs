// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the routing proxy.

use std::future::Future;
use std::sync::Arc;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    http::{
        HeaderValue, Method, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
    },
    middleware::{self as axum_middleware, Next},
    response::{IntoResponse, Response},
    routing::{any, get},
};
use switchboard_config::SwitchboardConfig;
use switchboard_core::SwitchboardError;
use switchboard_router::ModelSelector;
use switchboard_upstream::UpstreamClient;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared, immutable state for axum request handlers.
///
/// Everything request-specific lives in a per-request
/// [`RequestContext`](switchboard_core::RequestContext) instead.
#[derive(Clone)]
pub struct GatewayState {
    /// Effective configuration.
    pub config: Arc<SwitchboardConfig>,
    /// Model selector built from `[routing]`.
    pub selector: Arc<ModelSelector>,
    /// Pooled client for tokenization and completion calls.
    pub upstream: UpstreamClient,
}

impl GatewayState {
    /// Build the gateway state from a validated configuration.
    pub fn from_config(config: SwitchboardConfig) -> Result<Self, SwitchboardError> {
        let upstream = UpstreamClient::from_config(&config.upstream)?;
        let selector = ModelSelector::new(config.routing.clone());
        Ok(Self {
            config: Arc::new(config),
            selector: Arc::new(selector),
            upstream,
        })
    }
}

/// Build the application router.
///
/// Routes:
/// - `/chat/completions`, `/v1/chat/completions` (any method)
/// - `GET /models`, `GET /v1/models`
/// - `GET /health`
///
/// Every response, including 404s and preflights, carries the CORS headers.
/// Request bodies are not size-capped, since inline images can be large.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/chat/completions", any(handlers::chat_completions))
        .route("/v1/chat/completions", any(handlers::chat_completions))
        .route("/models", get(handlers::list_models))
        .route("/v1/models", get(handlers::list_models))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(axum_middleware::from_fn(preflight_middleware))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type, Authorization"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Answers every `OPTIONS` request with 200 and an empty body, whether or
/// not it carries an `Origin` header.
pub async fn preflight_middleware(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(request).await
}

/// Bind `host:port` and serve until `shutdown` resolves.
pub async fn start_server<F>(
    state: GatewayState,
    shutdown: F,
) -> Result<(), SwitchboardError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SwitchboardError::Internal(format!("failed to bind {addr}: {e}")))?;

    tracing::info!("switchboard listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| SwitchboardError::Internal(format!("server error: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_state_builds_from_defaults() {
        let state = GatewayState::from_config(SwitchboardConfig::default()).unwrap();
        let cloned = state.clone();
        assert_eq!(cloned.config.server.port, 8280);
        assert_eq!(
            cloned.upstream.completions_url(),
            "https://ark.cn-beijing.volces.com/api/v3/chat/completions"
        );
    }

    #[tokio::test]
    async fn start_server_reports_bind_failure() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let mut config = SwitchboardConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = taken.local_addr().unwrap().port();

        let state = GatewayState::from_config(config).unwrap();
        let err = start_server(state, async {}).await.unwrap_err();
        assert!(err.to_string().contains("failed to bind"), "got: {err}");
    }
}
