// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the upstream provider.
//!
//! One pooled [`reqwest::Client`] serves both the tokenization probe and
//! the completion forward. No retries: a failed call is reported once.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use switchboard_config::model::UpstreamConfig;
use switchboard_core::{Credential, SwitchboardError, TokenCounter};
use tracing::debug;

use crate::types::{TokenizationRequest, TokenizationResponse};

/// Client for the upstream tokenization and chat-completions endpoints.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl UpstreamClient {
    /// Creates a client for `base_url`.
    ///
    /// When set, `timeout` bounds the wait for a completion's response
    /// headers and the whole tokenization call. A completion body is never
    /// cut off once headers have arrived.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, SwitchboardError> {
        let client = reqwest::Client::builder().build().map_err(|e| SwitchboardError::Upstream {
            message: format!("failed to build HTTP client: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Creates a client from the `[upstream]` config section.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, SwitchboardError> {
        Self::new(&config.base_url, config.timeout_secs.map(Duration::from_secs))
    }

    /// `POST` target for token counting.
    pub fn tokenization_url(&self) -> String {
        format!("{}/tokenization", self.base_url)
    }

    /// Target for completion forwarding.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Sends a serialized completion request upstream.
    ///
    /// The caller's HTTP method and `Content-Type` are reused; `Authorization`
    /// always comes from `credential`. Any upstream status is returned as a
    /// response, only transport failures are errors.
    pub async fn forward_completion(
        &self,
        method: Method,
        content_type: Option<HeaderValue>,
        credential: &Credential,
        body: Vec<u8>,
    ) -> Result<reqwest::Response, SwitchboardError> {
        let content_type =
            content_type.unwrap_or_else(|| HeaderValue::from_static("application/json"));

        let request = self
            .client
            .request(method, self.completions_url())
            .header(CONTENT_TYPE, content_type)
            .header(AUTHORIZATION, auth_header(credential)?)
            .body(body)
            .send();

        let sent = match self.timeout {
            Some(duration) => tokio::time::timeout(duration, request)
                .await
                .map_err(|_| SwitchboardError::Timeout { duration })?,
            None => request.await,
        };
        let response = sent.map_err(|e| SwitchboardError::Upstream {
            message: format!("completion request failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        debug!(status = %response.status(), "completion response received");
        Ok(response)
    }

    /// One unbounded tokenization round trip.
    async fn probe_tokens(
        &self,
        credential: &Credential,
        model: &str,
        texts: &[String],
    ) -> Result<u64, SwitchboardError> {
        let response = self
            .client
            .post(self.tokenization_url())
            .header(AUTHORIZATION, auth_header(credential)?)
            .json(&TokenizationRequest { model, text: texts })
            .send()
            .await
            .map_err(|e| SwitchboardError::Tokenization {
                status: None,
                message: format!("tokenization request failed: {e}"),
            })?;

        let status = response.status();
        debug!(status = %status, "tokenization response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SwitchboardError::Tokenization {
                status: Some(status.as_u16()),
                message: format!("tokenization returned {status}: {body}"),
            });
        }

        let parsed: TokenizationResponse =
            response
                .json()
                .await
                .map_err(|e| SwitchboardError::Tokenization {
                    status: Some(status.as_u16()),
                    message: format!("failed to parse tokenization response: {e}"),
                })?;

        parsed
            .data
            .first()
            .map(|d| d.total_tokens)
            .ok_or_else(|| SwitchboardError::Tokenization {
                status: Some(status.as_u16()),
                message: "empty response data".to_string(),
            })
    }
}

#[async_trait]
impl TokenCounter for UpstreamClient {
    async fn count_tokens(
        &self,
        credential: &Credential,
        model: &str,
        texts: &[String],
    ) -> Result<u64, SwitchboardError> {
        let probe = self.probe_tokens(credential, model, texts);
        match self.timeout {
            Some(duration) => tokio::time::timeout(duration, probe).await.map_err(|_| {
                SwitchboardError::Tokenization {
                    status: None,
                    message: format!("tokenization timed out after {duration:?}"),
                }
            })?,
            None => probe.await,
        }
    }
}

fn auth_header(credential: &Credential) -> Result<HeaderValue, SwitchboardError> {
    let mut value = HeaderValue::from_str(credential.header_value())
        .map_err(|e| SwitchboardError::Config(format!("invalid credential header value: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}
