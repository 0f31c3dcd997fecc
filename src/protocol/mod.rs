//! Agent-to-agent message protocol

pub mod messages;
pub mod codec;
pub mod handler;

pub use messages::{Message, Metadata, Role, TextContent};
pub use codec::JsonCodec;
pub use handler::{EchoHandler, FnHandler, MessageHandler};

/// Default endpoint path served by the transport
pub const DEFAULT_ENDPOINT_PATH: &str = "/a2a";
