//! JSON wire codec for messages
//!
//! Encoding always emits the full key set. Decoding never fails: missing or
//! mistyped fields fall back to their defaults so that loosely conforming
//! peers can still talk to us.

use super::messages::{Message, Metadata, Role, TextContent};
use bytes::Bytes;
use serde_json::{json, Map, Value};

/// Maps [`Message`] to and from its JSON wire form
pub struct JsonCodec;

impl JsonCodec {
    /// Encode a message into a JSON object
    pub fn encode(message: &Message) -> Value {
        json!({
            "role": message.role().as_str(),
            "message_id": message.message_id(),
            "conversation_id": message.conversation_id(),
            "parent_message_id": message.parent_message_id(),
            "content": { "text": message.text() },
            "metadata": Value::Object(message.metadata().clone()),
        })
    }

    /// Encode a reply, adding the `parts` array multi-part clients expect
    pub fn encode_reply(message: &Message) -> Value {
        let mut value = Self::encode(message);
        if let Value::Object(map) = &mut value {
            map.insert("parts".to_string(), json!([{ "text": message.text() }]));
        }
        value
    }

    /// Decode a JSON value into a message, substituting defaults
    pub fn decode(value: &Value) -> Message {
        let empty = Map::new();
        let obj = value.as_object().unwrap_or(&empty);

        let role = obj
            .get("role")
            .and_then(Value::as_str)
            .map(Role::parse_lenient)
            .unwrap_or_default();

        let text = obj
            .get("content")
            .and_then(Value::as_object)
            .and_then(|content| content.get("text"))
            .and_then(scalar_to_string)
            .unwrap_or_default();

        let metadata = obj
            .get("metadata")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_else(Metadata::new);

        let mut message = Message::new(role, TextContent::new(text)).with_metadata_map(metadata);

        if let Some(id) = obj.get("message_id").and_then(scalar_to_string) {
            message = message.with_message_id(id);
        }
        if let Some(id) = obj.get("conversation_id").and_then(scalar_to_string) {
            message = message.with_conversation_id(id);
        }
        if let Some(id) = obj.get("parent_message_id").and_then(scalar_to_string) {
            message = message.with_parent_message_id(id);
        }

        message
    }

    /// Serialize a message to request body bytes
    pub fn to_bytes(message: &Message) -> Bytes {
        Bytes::from(Self::encode(message).to_string())
    }

    /// Decode raw body bytes. Anything that is not a JSON object decodes as `{}`.
    pub fn from_bytes(data: &[u8]) -> Message {
        Self::decode(&parse_object_or_empty(data))
    }
}

/// Parse a body as JSON, substituting an empty object on failure
pub(crate) fn parse_object_or_empty(data: &[u8]) -> Value {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Value::Object(Map::new());
    }
    match serde_json::from_slice::<Value>(data) {
        Ok(value @ Value::Object(_)) => value,
        Ok(_) => {
            tracing::warn!("Request body is not a JSON object, using defaults");
            Value::Object(Map::new())
        }
        Err(e) => {
            tracing::warn!("Malformed JSON body, using defaults: {}", e);
            Value::Object(Map::new())
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
