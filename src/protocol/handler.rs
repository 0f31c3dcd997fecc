//! Message handler capability invoked by the server

use super::messages::{Message, Role};
use async_trait::async_trait;
use tracing::debug;

/// Trait for handling messages.
///
/// Implementations own whatever state they need. Returning an error makes the
/// server answer with a 500 carrying the error's display text.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Handle incoming message and produce the reply
    async fn handle_message(&self, message: Message) -> anyhow::Result<Message>;
}

/// Replies as the agent with the same text it received
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoHandler;

#[async_trait]
impl MessageHandler for EchoHandler {
    async fn handle_message(&self, message: Message) -> anyhow::Result<Message> {
        debug!("Echoing message {}", message.message_id());
        Ok(message.reply(Role::Agent, message.text()))
    }
}

/// Adapts a plain closure into a [`MessageHandler`]
pub struct FnHandler<F> {
    func: F,
}

impl<F> FnHandler<F>
where
    F: Fn(Message) -> anyhow::Result<Message> + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F> MessageHandler for FnHandler<F>
where
    F: Fn(Message) -> anyhow::Result<Message> + Send + Sync,
{
    async fn handle_message(&self, message: Message) -> anyhow::Result<Message> {
        (self.func)(message)
    }
}
