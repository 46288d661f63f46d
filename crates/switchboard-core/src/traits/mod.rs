// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits for the routing pipeline.
//!
//! Traits use `#[async_trait]` so implementations can be held as trait objects.

pub mod tokenizer;

pub use tokenizer::TokenCounter;
