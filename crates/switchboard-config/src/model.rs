// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Switchboard routing proxy.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of silently falling back to a default.

use serde::{Deserialize, Serialize};

/// Top-level Switchboard configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SwitchboardConfig {
    /// HTTP listener and logging.
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream provider endpoints and credential handling.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Routing targets and the static model listing.
    #[serde(default)]
    pub models: ModelsConfig,

    /// Thresholds and policies for model selection.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Parameter defaults applied to every forwarded request.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8280
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Where the `Authorization` value for upstream calls comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialMode {
    /// Forward the caller's `Authorization` header unchanged.
    #[default]
    PassThrough,
    /// Always use `upstream.api_key`; the caller's header is ignored.
    ServerKey,
}

/// Upstream provider configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Base URL; `/tokenization` and `/chat/completions` are appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Server-held API key. Required when `credential_mode = "server_key"`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Credential strategy for outbound calls.
    #[serde(default)]
    pub credential_mode: CredentialMode,

    /// Per-call timeout. Unset means upstream calls are not bounded.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            credential_mode: CredentialMode::default(),
            timeout_secs: None,
        }
    }
}

impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("credential_mode", &self.credential_mode)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://ark.cn-beijing.volces.com/api/v3".to_string()
}

/// Where the three routing targets come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSource {
    /// Every tier resolves to the `model` named in the inbound request.
    #[default]
    Request,
    /// Tiers resolve to the identifiers in `[models]`.
    Config,
}

/// Routing targets and model listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelsConfig {
    /// How the routing targets are resolved.
    #[serde(default)]
    pub source: ModelSource,

    /// Target for long plain-text conversations.
    #[serde(default)]
    pub long_text_model: String,

    /// Target for short plain-text conversations.
    #[serde(default)]
    pub text_model: String,

    /// Target for conversations containing non-text parts.
    #[serde(default)]
    pub vision_model: String,

    /// Identifiers returned by `GET /models`.
    #[serde(default = "default_listed_models")]
    pub listed: Vec<String>,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            source: ModelSource::default(),
            long_text_model: String::new(),
            text_model: String::new(),
            vision_model: String::new(),
            listed: default_listed_models(),
        }
    }
}

fn default_listed_models() -> Vec<String> {
    vec![
        "ep-20250126174211-22h6d".to_string(),
        "gpt-3.5-turbo".to_string(),
        "gpt-4.0".to_string(),
    ]
}

/// How per-message classifications combine into one tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FoldPolicy {
    /// Each message overwrites the tier chosen so far. A text message after
    /// a multi-part one moves the request back to the text model.
    #[default]
    LastMessageWins,
    /// Once a message selects the vision tier, later messages cannot leave it.
    VisionSticky,
}

/// When a measured token count may promote a request to the long-text tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenOverridePolicy {
    /// Promote when the tokenization probe succeeded and exceeded the budget.
    #[default]
    OnSuccess,
    /// Only consider promotion when the probe failed, using the zero count
    /// reported on that path. Reproduces the legacy proxy.
    OnProbeError,
}

/// Model selection thresholds and policies.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Plain-text messages longer than this many characters select the long-text tier.
    #[serde(default = "default_long_text_chars")]
    pub long_text_chars: usize,

    /// Total measured tokens above which the long-text tier is forced.
    #[serde(default = "default_token_budget")]
    pub token_budget: u64,

    /// Per-message folding policy.
    #[serde(default)]
    pub fold_policy: FoldPolicy,

    /// Token-budget override policy.
    #[serde(default)]
    pub token_override: TokenOverridePolicy,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            long_text_chars: default_long_text_chars(),
            token_budget: default_token_budget(),
            fold_policy: FoldPolicy::default(),
            token_override: TokenOverridePolicy::default(),
        }
    }
}

fn default_long_text_chars() -> usize {
    15_000
}

fn default_token_budget() -> u64 {
    25_000
}

/// Sampling parameters filled in when the caller leaves them out.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_top_p")]
    pub top_p: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
        }
    }
}

fn default_temperature() -> f64 {
    1.0
}

fn default_top_p() -> f64 {
    0.7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_proxy() {
        let config = SwitchboardConfig::default();
        assert_eq!(config.server.port, 8280);
        assert_eq!(config.routing.long_text_chars, 15_000);
        assert_eq!(config.routing.token_budget, 25_000);
        assert_eq!(config.defaults.temperature, 1.0);
        assert_eq!(config.defaults.top_p, 0.7);
        assert_eq!(config.models.listed.len(), 3);
        assert_eq!(config.models.source, ModelSource::Request);
        assert_eq!(config.upstream.credential_mode, CredentialMode::PassThrough);
    }

    #[test]
    fn policies_parse_from_snake_case() {
        let toml_str = r#"
[upstream]
credential_mode = "server_key"
api_key = "sk-1"

[models]
source = "config"

[routing]
fold_policy = "vision_sticky"
token_override = "on_probe_error"
"#;
        let config: SwitchboardConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.upstream.credential_mode, CredentialMode::ServerKey);
        assert_eq!(config.models.source, ModelSource::Config);
        assert_eq!(config.routing.fold_policy, FoldPolicy::VisionSticky);
        assert_eq!(config.routing.token_override, TokenOverridePolicy::OnProbeError);
    }

    #[test]
    fn upstream_debug_redacts_api_key() {
        let upstream = UpstreamConfig {
            api_key: Some("sk-very-secret".to_string()),
            ..UpstreamConfig::default()
        };
        let debug = format!("{upstream:?}");
        assert!(debug.contains("[redacted]"));
        assert!(!debug.contains("sk-very-secret"));
    }

    #[test]
    fn unknown_routing_key_is_rejected() {
        let result = toml::from_str::<SwitchboardConfig>("[routing]\ntoken_budjet = 1\n");
        assert!(result.is_err());
    }
}
