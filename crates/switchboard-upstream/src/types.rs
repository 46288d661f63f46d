// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tokenization endpoint request and response types.

use serde::{Deserialize, Serialize};

/// Body of `POST {base}/tokenization`.
#[derive(Debug, Clone, Serialize)]
pub struct TokenizationRequest<'a> {
    pub model: &'a str,
    pub text: &'a [String],
}

/// Response of the tokenization endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenizationResponse {
    #[serde(default)]
    pub object: Option<String>,
    /// Missing `data` decodes as empty and is reported as an error by the client.
    #[serde(default)]
    pub data: Vec<TokenizationData>,
}

/// Per-batch token count.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenizationData {
    pub total_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_model_and_texts() {
        let texts = vec!["a".to_string(), "b c".to_string()];
        let body = serde_json::to_value(TokenizationRequest {
            model: "long",
            text: &texts,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"model": "long", "text": ["a", "b c"]}));
    }

    #[test]
    fn response_tolerates_extra_fields() {
        let json = r#"{"object":"list","data":[{"object":"tokenization","total_tokens":12,"token_ids":[1,2]}]}"#;
        let resp: TokenizationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.object.as_deref(), Some("list"));
        assert_eq!(resp.data[0].total_tokens, 12);
    }

    #[test]
    fn missing_data_decodes_as_empty() {
        let resp: TokenizationResponse = serde_json::from_str(r#"{"object":"list"}"#).unwrap();
        assert!(resp.data.is_empty());
    }
}
