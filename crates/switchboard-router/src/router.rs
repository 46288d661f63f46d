// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model selection: per-message folding followed by a token-budget override.
//!
//! Order: classify each message and fold its tier into the running choice,
//! then measure the text payloads and promote to the long-text tier when
//! the budget is exceeded.

use switchboard_config::model::{FoldPolicy, RoutingConfig, TokenOverridePolicy};
use switchboard_core::{
    CompletionRequest, ModelTier, RequestContext, SwitchboardError, TokenCounter,
};
use tracing::{info, warn};

use crate::classifier::{Classification, ContentClassifier, TextOrigin};

/// Outcome of folding every message of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldOutcome {
    /// Tier after the last message, `None` when the request has no messages.
    pub tier: Option<ModelTier>,
    /// TEXT payloads in message order, one per text message.
    pub texts: Vec<String>,
}

/// Final routing decision for one request.
#[derive(Debug, Clone)]
pub struct RoutingDecision {
    /// Model written into the forwarded request.
    pub model: String,
    /// Selected tier, `None` when nothing changed the inbound model.
    pub tier: Option<ModelTier>,
    /// Token count reported by the probe, if it ran and succeeded.
    pub total_tokens: Option<u64>,
    /// Whether the token budget promoted the request to the long-text tier.
    pub overridden: bool,
    /// Human-readable reason for the decision.
    pub reason: String,
}

/// Chooses the upstream model for a completion request.
pub struct ModelSelector {
    classifier: ContentClassifier,
    config: RoutingConfig,
}

impl ModelSelector {
    /// Create a selector with the given thresholds and policies.
    pub fn new(config: RoutingConfig) -> Self {
        Self {
            classifier: ContentClassifier::new(),
            config,
        }
    }

    /// Routing thresholds and policies in effect.
    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Route `request`, rewriting its `model` field.
    ///
    /// The token probe is awaited inline; its failure is logged and only
    /// affects whether the long-text override can fire.
    pub async fn select(
        &self,
        request: &mut CompletionRequest,
        ctx: &RequestContext,
        counter: &dyn TokenCounter,
    ) -> RoutingDecision {
        let fold = self.fold(request);

        let probe = if fold.texts.is_empty() {
            None
        } else {
            Some(
                counter
                    .count_tokens(&ctx.credential, &ctx.models.long_text_model, &fold.texts)
                    .await,
            )
        };

        let (tier, overridden) = match &probe {
            Some(result) => self.apply_token_budget(fold.tier, result),
            None => (fold.tier, false),
        };

        if let Some(tier) = tier {
            request.model = ctx.models.model_for(tier).to_string();
        }

        let total_tokens = probe.and_then(Result::ok);
        let reason = match (tier, overridden) {
            (_, true) => format!(
                "token count exceeds budget of {}",
                self.config.token_budget
            ),
            (Some(tier), false) => format!("{tier} content"),
            (None, false) => "no messages, inbound model kept".to_string(),
        };

        info!(
            model = request.model.as_str(),
            tier = ?tier,
            total_tokens,
            overridden,
            "model selected"
        );

        RoutingDecision {
            model: request.model.clone(),
            tier,
            total_tokens,
            overridden,
            reason,
        }
    }

    /// Classify every message in order and fold the per-message tiers.
    ///
    /// All-text part lists are collapsed to plain strings in `request`.
    pub fn fold(&self, request: &mut CompletionRequest) -> FoldOutcome {
        let mut tier = None;
        let mut texts = Vec::new();

        for message in &mut request.messages {
            let classification = self.classifier.classify(message);
            let next = self.tier_for(&classification);
            tier = Some(self.fold_tier(tier, next));
            if let Classification::Text { payload, .. } = classification {
                texts.push(payload);
            }
        }

        FoldOutcome { tier, texts }
    }

    /// Tier a single classification asks for.
    pub fn tier_for(&self, classification: &Classification) -> ModelTier {
        match classification {
            Classification::Mixed | Classification::Unparseable => ModelTier::Vision,
            Classification::Text {
                origin: TextOrigin::Parts,
                ..
            } => ModelTier::Text,
            Classification::Text {
                payload,
                origin: TextOrigin::Plain,
            } => {
                if payload.chars().count() > self.config.long_text_chars {
                    ModelTier::LongText
                } else {
                    ModelTier::Text
                }
            }
        }
    }

    /// Combine the running tier with the next message's tier.
    fn fold_tier(&self, current: Option<ModelTier>, next: ModelTier) -> ModelTier {
        match (self.config.fold_policy, current) {
            (FoldPolicy::VisionSticky, Some(ModelTier::Vision)) => ModelTier::Vision,
            _ => next,
        }
    }

    /// Apply the token-budget override to the folded tier.
    ///
    /// A failed probe counts as zero tokens. Returns the resulting tier and
    /// whether the override fired.
    pub fn apply_token_budget(
        &self,
        tier: Option<ModelTier>,
        probe: &Result<u64, SwitchboardError>,
    ) -> (Option<ModelTier>, bool) {
        let (count, failed) = match probe {
            Ok(count) => (*count, false),
            Err(e) => {
                warn!(error = %e, "token count probe failed");
                (0, true)
            }
        };

        let eligible = match self.config.token_override {
            TokenOverridePolicy::OnSuccess => !failed,
            TokenOverridePolicy::OnProbeError => failed,
        };

        if eligible && count > self.config.token_budget && tier != Some(ModelTier::Vision) {
            (Some(ModelTier::LongText), tier != Some(ModelTier::LongText))
        } else {
            (tier, false)
        }
    }
}
