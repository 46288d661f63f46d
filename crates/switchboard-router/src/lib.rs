// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content classification and model routing for the Switchboard proxy.
//!
//! This crate provides:
//! - [`ContentClassifier`]: per-message TEXT / MIXED / UNPARSEABLE classification
//! - [`ModelSelector`]: folds classifications into a model tier and applies
//!   the token-budget override
//!
//! The selector runs on every completion request before it is forwarded,
//! choosing between the long-text, text, and vision models.

pub mod classifier;
pub mod router;

pub use classifier::{Classification, ContentClassifier, TextOrigin};
pub use router::{FoldOutcome, ModelSelector, RoutingDecision};
pub use switchboard_config::model::{FoldPolicy, TokenOverridePolicy};
