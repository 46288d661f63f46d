// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-message content classification.
//!
//! Decides whether a message is pure text, and collapses all-text part
//! lists into a single string so the upstream sees plain content.

use switchboard_core::{ChatMessage, ContentPart, MessageContent};
use tracing::debug;

/// Where a TEXT payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOrigin {
    /// The content was a plain string.
    Plain,
    /// The content was a part list in which every part was text.
    Parts,
}

/// Result of classifying one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Pure text, with the normalized payload.
    Text { payload: String, origin: TextOrigin },
    /// A part list containing at least one non-text or malformed part.
    Mixed,
    /// Content that is neither a string nor a part list.
    Unparseable,
}

impl Classification {
    /// The text payload, if the message classified as TEXT.
    pub fn payload(&self) -> Option<&str> {
        match self {
            Classification::Text { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Text { .. } => "text",
            Classification::Mixed => "mixed",
            Classification::Unparseable => "unparseable",
        }
    }
}

/// Stateless message content classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentClassifier;

impl ContentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify `message` and normalize its content in place.
    ///
    /// An all-text part list is replaced by `Text` holding every part's text
    /// followed by a single space. Mixed and unparseable content is left as is.
    pub fn classify(&self, message: &mut ChatMessage) -> Classification {
        let classification = match &message.content {
            MessageContent::Text(text) => Classification::Text {
                payload: text.clone(),
                origin: TextOrigin::Plain,
            },
            MessageContent::Parts(parts) => match Self::combine_text_parts(parts) {
                Some(combined) => Classification::Text {
                    payload: combined,
                    origin: TextOrigin::Parts,
                },
                None => Classification::Mixed,
            },
            MessageContent::Other(_) => Classification::Unparseable,
        };

        if let Classification::Text {
            payload,
            origin: TextOrigin::Parts,
        } = &classification
        {
            message.content = MessageContent::Text(payload.clone());
        }

        debug!(
            role = message.role.as_str(),
            classification = classification.label(),
            chars = classification.payload().map(|p| p.chars().count()),
            "classified message content"
        );
        classification
    }

    /// Concatenate the parts' text if every part is a text part.
    fn combine_text_parts(parts: &[ContentPart]) -> Option<String> {
        parts.iter().try_fold(String::new(), |mut combined, part| {
            combined.push_str(part.as_text()?);
            combined.push(' ');
            Some(combined)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn message(content: serde_json::Value) -> ChatMessage {
        serde_json::from_value(json!({"role": "user", "content": content})).unwrap()
    }

    #[test]
    fn plain_string_is_text() {
        let mut msg = message(json!("hello"));
        let c = ContentClassifier::new().classify(&mut msg);
        assert_eq!(
            c,
            Classification::Text {
                payload: "hello".into(),
                origin: TextOrigin::Plain
            }
        );
        assert_eq!(msg.content, MessageContent::Text("hello".into()));
    }

    #[test]
    fn all_text_parts_are_joined_with_trailing_spaces() {
        let mut msg = message(json!([
            {"type": "text", "text": "first"},
            {"type": "text", "text": "second"}
        ]));
        let c = ContentClassifier::new().classify(&mut msg);
        assert_eq!(c.payload(), Some("first second "));
        assert_eq!(msg.content, MessageContent::Text("first second ".into()));
        assert_eq!(serde_json::to_value(&msg).unwrap()["content"], json!("first second "));
    }

    #[test]
    fn extra_fields_on_text_parts_do_not_disqualify() {
        let mut msg = message(json!([
            {"type": "text", "text": "cached", "cache_control": {"type": "ephemeral"}}
        ]));
        assert_eq!(
            ContentClassifier::new().classify(&mut msg).payload(),
            Some("cached ")
        );
    }

    #[test]
    fn empty_part_list_is_empty_text() {
        let mut msg = message(json!([]));
        let c = ContentClassifier::new().classify(&mut msg);
        assert_eq!(c.payload(), Some(""));
        assert_eq!(msg.content, MessageContent::Text(String::new()));
    }

    #[test]
    fn image_part_makes_message_mixed_and_untouched() {
        let raw = json!([
            {"type": "text", "text": "hi"},
            {"type": "image_url", "image_url": {"url": "http://x/y.png"}}
        ]);
        let mut msg = message(raw.clone());
        assert_eq!(ContentClassifier::new().classify(&mut msg), Classification::Mixed);
        assert_eq!(serde_json::to_value(&msg.content).unwrap(), raw);
    }

    #[test]
    fn malformed_parts_make_message_mixed() {
        let cases = [
            json!([{"text": "no type"}]),
            json!([{"type": 1, "text": "numeric type"}]),
            json!([{"type": "text"}]),
            json!([{"type": "Text", "text": "wrong case"}]),
            json!(["not an object"]),
            json!([{"type": "text", "text": "ok"}, null]),
        ];
        for raw in cases {
            let mut msg = message(raw.clone());
            assert_eq!(
                ContentClassifier::new().classify(&mut msg),
                Classification::Mixed,
                "{raw}"
            );
        }
    }

    #[test]
    fn non_string_non_array_is_unparseable() {
        for raw in [json!({"text": "object"}), json!(12), json!(true), json!(null)] {
            let mut msg = message(raw.clone());
            assert_eq!(
                ContentClassifier::new().classify(&mut msg),
                Classification::Unparseable,
                "{raw}"
            );
        }
    }

    proptest! {
        #[test]
        fn plain_text_reserializes_to_same_string(text in any::<String>()) {
            let mut msg = ChatMessage::text("user", text.clone());
            let c = ContentClassifier::new().classify(&mut msg);
            prop_assert_eq!(c.payload(), Some(text.as_str()));

            let encoded = serde_json::to_string(&msg).unwrap();
            let decoded: serde_json::Value = serde_json::from_str(&encoded).unwrap();
            prop_assert_eq!(decoded["content"].as_str(), Some(text.as_str()));
        }

        #[test]
        fn classification_is_idempotent(parts in proptest::collection::vec("[a-z ]{0,12}", 0..5)) {
            let raw: Vec<_> = parts.iter().map(|t| json!({"type": "text", "text": t})).collect();
            let mut msg = message(json!(raw));
            let first = ContentClassifier::new().classify(&mut msg);
            let second = ContentClassifier::new().classify(&mut msg);
            prop_assert_eq!(first.payload(), second.payload());
            prop_assert_eq!(second, Classification::Text {
                payload: first.payload().unwrap_or_default().to_string(),
                origin: TextOrigin::Plain,
            });
        }
    }
}
