// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Token counting seam used by the model selector.

use async_trait::async_trait;

use crate::error::SwitchboardError;
use crate::types::Credential;

/// Counts tokens for a batch of texts against a given model.
///
/// Implemented by the upstream HTTP client; tests substitute fixed counts.
#[async_trait]
pub trait TokenCounter: Send + Sync {
    /// Returns the total token count of `texts` as measured for `model`.
    async fn count_tokens(
        &self,
        credential: &Credential,
        model: &str,
        texts: &[String],
    ) -> Result<u64, SwitchboardError>;
}
