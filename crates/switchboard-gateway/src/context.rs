// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-request credential and model-set resolution.
//!
//! Credentials are resolved in one of two modes, chosen at startup:
//! 1. `pass_through`: the caller's `Authorization` header is forwarded verbatim
//! 2. `server_key`: the configured `upstream.api_key` is sent as a bearer token
//!
//! A pass-through request without an `Authorization` header is rejected.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use switchboard_config::model::{CredentialMode, ModelSource, ModelsConfig, UpstreamConfig};
use switchboard_core::{Credential, ModelSet, SwitchboardError};

/// Resolve the credential to send upstream for this request.
pub fn resolve_credential(
    upstream: &UpstreamConfig,
    headers: &HeaderMap,
) -> Result<Credential, SwitchboardError> {
    match upstream.credential_mode {
        CredentialMode::PassThrough => headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(Credential::verbatim)
            .ok_or_else(|| SwitchboardError::Config("API key not set".to_string())),
        CredentialMode::ServerKey => upstream
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .map(Credential::bearer)
            .ok_or_else(|| SwitchboardError::Config("upstream.api_key is not set".to_string())),
    }
}

/// Resolve the routing targets for a request whose inbound model is `inbound_model`.
pub fn resolve_models(models: &ModelsConfig, inbound_model: &str) -> ModelSet {
    match models.source {
        ModelSource::Request => ModelSet::uniform(inbound_model),
        ModelSource::Config => ModelSet::new(
            models.long_text_model.as_str(),
            models.text_model.as_str(),
            models.vision_model.as_str(),
        ),
    }
}
