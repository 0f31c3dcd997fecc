//! A2A Echo Server Binary
//!
//! Serves the A2A endpoint with a handler that echoes each message back as
//! the agent. Useful as a local peer when developing clients.

use a2a_bridge::{
    config::Config,
    observability,
    protocol::{EchoHandler, MessageHandler},
    transport::A2aServer,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Load configuration from file, falling back to defaults
    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "a2a.toml".to_string());
    let config = Config::from_file(&config_path)?;

    observability::init_from_config(&config.logging);
    info!("Starting A2A echo server");
    info!("Configuration loaded and validated from {}", config_path);

    let handler: Arc<dyn MessageHandler> = Arc::new(EchoHandler);
    let server = A2aServer::bind(&config.server, handler).await?;
    info!("Press Ctrl+C to stop");

    server.run().await?;

    info!("Server shutdown complete");

    Ok(())
}
