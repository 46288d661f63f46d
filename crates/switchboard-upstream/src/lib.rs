// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Upstream provider client for Switchboard.
//!
//! [`UpstreamClient`] measures token counts through the provider's
//! tokenization endpoint and relays rewritten completion requests to its
//! chat-completions endpoint.

pub mod client;
pub mod types;

pub use client::UpstreamClient;
pub use types::{TokenizationRequest, TokenizationResponse};
