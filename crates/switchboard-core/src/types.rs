// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for OpenAI-style chat completion requests, plus the
//! per-request routing context.

use secrecy::{ExposeSecret, SecretString};
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::Display;

/// An inbound chat completion request.
///
/// Known OpenAI parameters are typed; any other top-level field is kept in
/// `extra` and written back untouched when the request is forwarded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionRequest {
    #[serde(default)]
    pub model: String,

    #[serde(default)]
    pub messages: Vec<ChatMessage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,

    /// Either a single stop string or a list of them; relayed as given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logit_bias: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CompletionRequest {
    /// Whether the caller asked for a streamed response.
    pub fn is_stream(&self) -> bool {
        self.stream.unwrap_or(false)
    }

    /// Fill in `temperature` and `top_p` when the caller left them out.
    pub fn apply_defaults(&mut self, temperature: f64, top_p: f64) {
        self.temperature.get_or_insert(temperature);
        self.top_p.get_or_insert(top_p);
    }
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub role: String,

    /// Missing content decodes as `Other(null)` and is written back as `null`.
    #[serde(default)]
    pub content: MessageContent,
}

impl ChatMessage {
    /// Convenience constructor for a plain-text message.
    pub fn text(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: MessageContent::Text(text.into()),
        }
    }
}

/// Message content, decided by shape when the request is decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// A plain JSON string.
    Text(String),
    /// A JSON array of content parts.
    Parts(Vec<ContentPart>),
    /// Anything else (object, number, bool, null).
    Other(Value),
}

impl Default for MessageContent {
    fn default() -> Self {
        MessageContent::Other(Value::Null)
    }
}

/// One element of a multi-part message.
///
/// An element is a [`ContentPart::Text`] only if it is an object whose
/// `type` is exactly the string `"text"` and whose `text` is a string.
/// Every other element is kept verbatim as [`ContentPart::Other`].
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text { text: String },
    Other(Value),
}

impl ContentPart {
    /// Classify a raw JSON element.
    pub fn from_value(value: Value) -> Self {
        let is_text = value.get("type").and_then(Value::as_str) == Some("text");
        match value.get("text").and_then(Value::as_str) {
            Some(text) if is_text => ContentPart::Text {
                text: text.to_string(),
            },
            _ => ContentPart::Other(value),
        }
    }

    /// The text payload, if this is a text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentPart::Text { text } => Some(text),
            ContentPart::Other(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for ContentPart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(ContentPart::from_value)
    }
}

impl Serialize for ContentPart {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ContentPart::Text { text } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "text")?;
                map.serialize_entry("text", text)?;
                map.end()
            }
            ContentPart::Other(value) => value.serialize(serializer),
        }
    }
}

/// The three routing targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ModelTier {
    /// Long plain-text conversations.
    LongText,
    /// Short plain-text conversations.
    Text,
    /// Anything carrying non-text parts.
    Vision,
}

/// Model identifiers for each [`ModelTier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSet {
    pub long_text_model: String,
    pub text_model: String,
    pub vision_model: String,
}

impl ModelSet {
    pub fn new(
        long_text_model: impl Into<String>,
        text_model: impl Into<String>,
        vision_model: impl Into<String>,
    ) -> Self {
        Self {
            long_text_model: long_text_model.into(),
            text_model: text_model.into(),
            vision_model: vision_model.into(),
        }
    }

    /// A model set that routes every tier to the same identifier.
    pub fn uniform(model: &str) -> Self {
        Self::new(model, model, model)
    }

    /// The identifier configured for `tier`.
    pub fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::LongText => &self.long_text_model,
            ModelTier::Text => &self.text_model,
            ModelTier::Vision => &self.vision_model,
        }
    }
}

/// The `Authorization` value sent upstream.
#[derive(Debug, Clone)]
pub struct Credential(SecretString);

impl Credential {
    /// Build a credential from a bare API key, adding the `Bearer` scheme.
    pub fn bearer(api_key: &str) -> Self {
        let value = if api_key.starts_with("Bearer ") {
            api_key.to_string()
        } else {
            format!("Bearer {api_key}")
        };
        Self(SecretString::from(value))
    }

    /// Use an `Authorization` header value exactly as the caller sent it.
    pub fn verbatim(header_value: &str) -> Self {
        Self(SecretString::from(header_value.to_string()))
    }

    /// The header value to send upstream.
    pub fn header_value(&self) -> &str {
        self.0.expose_secret()
    }
}

/// Everything a single inbound request needs to be routed and forwarded.
///
/// Built once per request and passed explicitly; nothing here is shared
/// between concurrent requests.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub models: ModelSet,
    pub credential: Credential,
}
