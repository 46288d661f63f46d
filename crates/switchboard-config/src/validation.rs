// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks the constraints serde cannot express, such as a server key being
//! present when the server-key credential mode is selected.

use crate::diagnostic::ConfigError;
use crate::model::{CredentialMode, ModelSource, SwitchboardConfig};

/// Validate a deserialized configuration.
///
/// Collects every violation instead of stopping at the first one.
pub fn validate_config(config: &SwitchboardConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut invalid = |message: String| errors.push(ConfigError::Validation { message });

    if config.server.host.trim().is_empty() {
        invalid("server.host must not be empty".to_string());
    }

    let base_url = config.upstream.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        invalid(format!(
            "upstream.base_url `{base_url}` must start with http:// or https://"
        ));
    }

    if config.upstream.credential_mode == CredentialMode::ServerKey
        && config
            .upstream
            .api_key
            .as_deref()
            .is_none_or(|key| key.trim().is_empty())
    {
        invalid(
            "upstream.api_key is required when upstream.credential_mode = \"server_key\""
                .to_string(),
        );
    }

    if config.upstream.timeout_secs == Some(0) {
        invalid("upstream.timeout_secs must be greater than 0 when set".to_string());
    }

    if config.models.source == ModelSource::Config {
        for (key, value) in [
            ("long_text_model", &config.models.long_text_model),
            ("text_model", &config.models.text_model),
            ("vision_model", &config.models.vision_model),
        ] {
            if value.trim().is_empty() {
                invalid(format!(
                    "models.{key} must be set when models.source = \"config\""
                ));
            }
        }
    }

    if config.routing.long_text_chars == 0 {
        invalid("routing.long_text_chars must be greater than 0".to_string());
    }

    let temperature = config.defaults.temperature;
    if !(0.0..=2.0).contains(&temperature) {
        invalid(format!(
            "defaults.temperature must be between 0 and 2, got {temperature}"
        ));
    }

    let top_p = config.defaults.top_p;
    if !(0.0..=1.0).contains(&top_p) {
        invalid(format!("defaults.top_p must be between 0 and 1, got {top_p}"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&SwitchboardConfig::default()).is_ok());
    }

    #[test]
    fn server_key_mode_requires_api_key() {
        let mut config = SwitchboardConfig::default();
        config.upstream.credential_mode = CredentialMode::ServerKey;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "upstream.api_key"));

        config.upstream.api_key = Some("sk-1".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn config_model_source_requires_all_three_models() {
        let mut config = SwitchboardConfig::default();
        config.models.source = ModelSource::Config;
        config.models.text_model = "short".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(has_error(&errors, "models.long_text_model"));
        assert!(has_error(&errors, "models.vision_model"));
    }

    #[test]
    fn collects_every_violation() {
        let mut config = SwitchboardConfig::default();
        config.server.host = " ".to_string();
        config.upstream.base_url = "ftp://example".to_string();
        config.defaults.top_p = 1.5;
        config.defaults.temperature = -1.0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "server.host"));
        assert!(has_error(&errors, "upstream.base_url"));
        assert!(has_error(&errors, "defaults.top_p"));
        assert!(has_error(&errors, "defaults.temperature"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = SwitchboardConfig::default();
        config.upstream.timeout_secs = Some(0);
        assert!(has_error(
            &validate_config(&config).unwrap_err(),
            "timeout_secs"
        ));
    }
}
