//! A2A Bridge - minimal agent-to-agent message exchange over HTTP
//!
//! This library provides a small message model, a lenient JSON wire codec and
//! a single-endpoint HTTP server/client pair. Application logic plugs in
//! through the [`protocol::MessageHandler`] trait.
//!
//! ## Features
//!
//! - **Lenient decoding**: malformed or partial payloads decode to defaults
//! - **Handler isolation**: handler errors and panics become a 500 reply
//! - **Shape-tolerant client**: `parts`, `content.text` or raw body replies
//! - **Layered configuration**: TOML file plus `A2A__*` environment overrides
//! - **Career pipeline**: a staged handler over caller-owned session state
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use a2a_bridge::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ServerConfig::default();
//!     let server = A2aServer::bind(&config, Arc::new(EchoHandler)).await?;
//!     let url = server.endpoint_url()?;
//!     tokio::spawn(server.run());
//!
//!     let client = A2aClient::new(url)?;
//!     if let Some(response) = client.send_message(&Message::user("Hello")).await? {
//!         println!("{}", response.text());
//!     }
//!     Ok(())
//! }
//! ```

pub mod career;
pub mod config;
pub mod error;
pub mod observability;
pub mod protocol;
pub mod shutdown;
pub mod transport;

pub use config::Config;
pub use error::{A2aError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::career::{CareerAgents, CareerHandler, CareerSession, JobListing, SessionStore};
    pub use crate::config::{ClientConfig, Config, ServerConfig};
    pub use crate::error::{A2aError, CareerError, Result, TransportError};
    pub use crate::protocol::{
        EchoHandler, FnHandler, JsonCodec, Message, MessageHandler, Role, TextContent,
    };
    pub use crate::shutdown::{ShutdownCoordinator, ShutdownNotifier};
    pub use crate::transport::{A2aClient, A2aServer, ClientResponse, ResponsePart};
}
