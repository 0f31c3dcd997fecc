//! Message types for agent-to-agent exchange

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Open metadata mapping carried alongside each message
pub type Metadata = Map<String, Value>;

/// Author of a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Agent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Agent => "agent",
        }
    }

    /// Parse a wire role, falling back to `User` for anything unrecognized
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "agent" => Role::Agent,
            _ => Role::User,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plain text payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TextContent {
    pub text: String,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// One unit of agent communication.
///
/// Fields are private so a message cannot change after it is built; the
/// `with_*` methods consume the message and return a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    role: Role,
    content: TextContent,
    conversation_id: Option<String>,
    parent_message_id: Option<String>,
    message_id: String,
    metadata: Metadata,
}

impl Message {
    /// Create a message with a freshly generated id and empty metadata
    pub fn new(role: Role, content: TextContent) -> Self {
        Self {
            role,
            content,
            conversation_id: None,
            parent_message_id: None,
            message_id: generate_message_id(),
            metadata: Metadata::new(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, TextContent::new(text))
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Role::Agent, TextContent::new(text))
    }

    /// Use a caller-supplied id. An empty id keeps the generated one.
    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        let message_id = message_id.into();
        if !message_id.is_empty() {
            self.message_id = message_id;
        }
        self
    }

    pub fn with_conversation_id(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }

    pub fn with_parent_message_id(mut self, parent_message_id: impl Into<String>) -> Self {
        self.parent_message_id = Some(parent_message_id.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Replace the whole metadata mapping
    pub fn with_metadata_map(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Build a reply in the same conversation, pointing back at this message
    pub fn reply(&self, role: Role, text: impl Into<String>) -> Message {
        let mut reply = Message::new(role, TextContent::new(text))
            .with_parent_message_id(self.message_id.clone());
        reply.conversation_id = self.conversation_id.clone();
        reply
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &TextContent {
        &self.content
    }

    /// Shorthand for `content().text`
    pub fn text(&self) -> &str {
        &self.content.text
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn parent_message_id(&self) -> Option<&str> {
        self.parent_message_id.as_deref()
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

pub(crate) fn generate_message_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_message_defaults() {
        let message = Message::user("Hello");

        assert_eq!(message.role(), Role::User);
        assert_eq!(message.text(), "Hello");
        assert!(message.conversation_id().is_none());
        assert!(message.parent_message_id().is_none());
        assert!(!message.message_id().is_empty());
        assert!(message.metadata().is_empty());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Message::user("same");
        let b = Message::user("same");

        assert_ne!(a.message_id(), b.message_id());
    }

    #[test]
    fn test_empty_content_is_valid() {
        let message = Message::agent("");
        assert_eq!(message.text(), "");
        assert_eq!(message.role(), Role::Agent);
    }

    #[test]
    fn test_builder_fields() {
        let message = Message::user("hi")
            .with_message_id("m-1")
            .with_conversation_id("c-1")
            .with_parent_message_id("p-1")
            .with_metadata("source", json!("resume"));

        assert_eq!(message.message_id(), "m-1");
        assert_eq!(message.conversation_id(), Some("c-1"));
        assert_eq!(message.parent_message_id(), Some("p-1"));
        assert_eq!(message.metadata().get("source"), Some(&json!("resume")));
    }

    #[test]
    fn test_empty_message_id_keeps_generated() {
        let message = Message::user("hi").with_message_id("");
        assert!(!message.message_id().is_empty());
    }

    #[test]
    fn test_reply_threads_conversation() {
        let original = Message::user("question").with_conversation_id("conv-7");
        let reply = original.reply(Role::Agent, "answer");

        assert_eq!(reply.role(), Role::Agent);
        assert_eq!(reply.text(), "answer");
        assert_eq!(reply.conversation_id(), Some("conv-7"));
        assert_eq!(reply.parent_message_id(), Some(original.message_id()));
        assert_ne!(reply.message_id(), original.message_id());
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::parse_lenient("agent"), Role::Agent);
        assert_eq!(Role::parse_lenient("user"), Role::User);
        assert_eq!(Role::parse_lenient("system"), Role::User);
        assert_eq!(Role::parse_lenient(""), Role::User);
        assert_eq!(Role::Agent.to_string(), "agent");
    }
}
