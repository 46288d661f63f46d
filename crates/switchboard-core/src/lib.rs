// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Switchboard routing proxy.
//!
//! This crate provides the request wire types, the per-request routing
//! context, the shared error type, and the collaborator traits the router
//! and upstream crates meet at.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SwitchboardError;
pub use traits::TokenCounter;
pub use types::{
    ChatMessage, CompletionRequest, ContentPart, Credential, MessageContent, ModelSet, ModelTier,
    RequestContext,
};
