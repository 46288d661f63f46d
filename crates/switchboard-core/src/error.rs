// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Switchboard routing proxy.

use thiserror::Error;

/// The primary error type used across the routing pipeline.
#[derive(Debug, Error)]
pub enum SwitchboardError {
    /// Configuration errors (missing credential, invalid header value, bad model set).
    #[error("configuration error: {0}")]
    Config(String),

    /// The inbound request body could not be read or was empty.
    #[error("request body error: {0}")]
    RequestBody(String),

    /// The inbound request body was not a valid completion request.
    #[error("parse error: {message}")]
    Parse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The tokenization endpoint answered with a non-2xx status or an unusable body.
    #[error("tokenization error: {message}")]
    Tokenization {
        /// Upstream status code, when the failure came from a response.
        status: Option<u16>,
        message: String,
    },

    /// Transport failure talking to the chat-completions endpoint.
    #[error("upstream error: {message}")]
    Upstream {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Re-serializing the rewritten request failed.
    #[error("serialization error: {source}")]
    Serialization {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SwitchboardError {
    /// Whether the error was caused by the caller's request rather than by
    /// this process or the upstream.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SwitchboardError::RequestBody(_) | SwitchboardError::Parse { .. }
        )
    }
}
