// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the routing proxy.
//!
//! Handles `/chat/completions`, `/models`, and `/health`.

use axum::{
    Json,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Method, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use futures::TryStreamExt;
use serde::Serialize;
use switchboard_core::{CompletionRequest, RequestContext, SwitchboardError};
use tracing::{debug, error, warn};

use crate::context::{resolve_credential, resolve_models};
use crate::server::GatewayState;

/// Response body for `GET /models`.
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// A [`SwitchboardError`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub SwitchboardError);

impl From<SwitchboardError> for ApiError {
    fn from(err: SwitchboardError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code the error is reported with.
    pub fn status(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        } else {
            warn!(error = %self.0, "request rejected");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// `/chat/completions` and `/v1/chat/completions`, any method.
///
/// Resolves the credential, decodes the body, applies parameter defaults,
/// routes the request to a model, and relays the upstream response.
pub async fn chat_completions(
    State(state): State<GatewayState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let credential = resolve_credential(&state.config.upstream, &headers)?;

    if body.is_empty() {
        return Err(SwitchboardError::RequestBody("empty request body".to_string()).into());
    }

    let mut request: CompletionRequest =
        serde_json::from_slice(&body).map_err(|e| SwitchboardError::Parse {
            message: format!("failed to parse request body: {e}"),
            source: Some(Box::new(e)),
        })?;

    let defaults = &state.config.defaults;
    request.apply_defaults(defaults.temperature, defaults.top_p);

    let ctx = RequestContext {
        models: resolve_models(&state.config.models, &request.model),
        credential,
    };

    let decision = state
        .selector
        .select(&mut request, &ctx, &state.upstream)
        .await;
    debug!(reason = decision.reason.as_str(), "routing decision");

    let payload = serde_json::to_vec(&request).map_err(|e| SwitchboardError::Serialization {
        source: Box::new(e),
    })?;

    let upstream = state
        .upstream
        .forward_completion(
            method,
            headers.get(CONTENT_TYPE).cloned(),
            &ctx.credential,
            payload,
        )
        .await?;

    relay(upstream, request.is_stream()).await
}

/// Copy the upstream status, content type, and body onto a response.
async fn relay(upstream: reqwest::Response, stream: bool) -> Result<Response, ApiError> {
    let status = upstream.status();
    let content_type = upstream.headers().get(CONTENT_TYPE).cloned();

    let body = if stream {
        let chunks = upstream
            .bytes_stream()
            .inspect_err(|e| warn!(error = %e, "upstream stream interrupted"));
        Body::from_stream(chunks)
    } else {
        let bytes = upstream
            .bytes()
            .await
            .map_err(|e| SwitchboardError::Upstream {
                message: format!("failed to read upstream response: {e}"),
                source: Some(Box::new(e)),
            })?;
        debug!(
            status = status.as_u16(),
            body = %String::from_utf8_lossy(&bytes),
            "upstream response"
        );
        Body::from(bytes)
    };

    let mut response = Response::new(body);
    *response.status_mut() = status;
    if let Some(content_type) = content_type {
        response.headers_mut().insert(CONTENT_TYPE, content_type);
    }
    Ok(response)
}

/// `GET /models` and `GET /v1/models`
pub async fn list_models(State(state): State<GatewayState>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: state.config.models.listed.clone(),
    })
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Fallback for unknown routes.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "not found".to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_400() {
        let err = ApiError::from(SwitchboardError::RequestBody("empty".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ApiError::from(SwitchboardError::Parse {
            message: "bad".into(),
            source: None,
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn server_errors_map_to_500() {
        let cases = [
            SwitchboardError::Config("API key not set".into()),
            SwitchboardError::Upstream {
                message: "down".into(),
                source: None,
            },
            SwitchboardError::Timeout {
                duration: std::time::Duration::from_secs(1),
            },
            SwitchboardError::Internal("boom".into()),
        ];
        for err in cases {
            assert_eq!(
                ApiError::from(err).status(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }

    #[tokio::test]
    async fn error_body_is_json() {
        let response =
            ApiError::from(SwitchboardError::Config("API key not set".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "configuration error: API key not set");
    }
}
