// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Switchboard routing proxy.
//!
//! Accepts OpenAI-style chat completion requests, routes each one to the
//! long-text, text, or vision model, and relays the upstream response.

pub mod context;
pub mod handlers;
pub mod server;

pub use handlers::{ApiError, ErrorResponse};
pub use server::{GatewayState, router, start_server};
