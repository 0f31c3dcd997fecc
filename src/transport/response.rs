//! Client-side view of a reply

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One text segment of a reply
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponsePart {
    pub text: String,
}

impl ResponsePart {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Normalized reply holding one or more text parts
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientResponse {
    pub parts: Vec<ResponsePart>,
}

impl ClientResponse {
    /// Build a response from whatever shape the server replied with.
    ///
    /// Tries a non-empty `parts` array first, then a non-empty `content`
    /// object, and finally falls back to the whole body as text.
    pub fn from_value(value: &Value) -> Self {
        if let Some(parts) = value.get("parts").and_then(Value::as_array) {
            if !parts.is_empty() {
                return Self {
                    parts: parts.iter().map(|p| ResponsePart::new(part_text(p))).collect(),
                };
            }
        }

        if let Some(content) = value.get("content").and_then(Value::as_object) {
            if !content.is_empty() {
                let text = content.get("text").map(text_of).unwrap_or_default();
                return Self { parts: vec![ResponsePart::new(text)] };
            }
        }

        Self { parts: vec![ResponsePart::new(text_of(value))] }
    }

    /// All parts joined with newlines
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn first_text(&self) -> Option<&str> {
        self.parts.first().map(|p| p.text.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

fn part_text(part: &Value) -> String {
    part.get("text").map(text_of).unwrap_or_default()
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
