//! Echo round trip: serve the echo handler locally and talk to it

use a2a_bridge::prelude::*;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    a2a_bridge::observability::init_observability("info", "pretty");

    println!("=== A2A Echo Round Trip ===\n");

    println!("1. Starting server...");
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    };
    let server = A2aServer::bind(&config, Arc::new(EchoHandler)).await?;
    let url = server.endpoint_url()?;

    let coordinator = ShutdownCoordinator::new();
    let notifier = coordinator.subscribe();
    let handle = tokio::spawn(server.serve_with_shutdown(notifier.wait()));
    println!("   ✓ Listening on {}\n", url);

    println!("2. Sending messages...");
    let client = A2aClient::new(url)?;
    let first = Message::user("Hello").with_conversation_id("demo");
    if let Some(response) = client.send_message(&first).await? {
        println!("   → {}", first.text());
        println!("   ← {}", response.text());
    }

    let follow_up = first.reply(Role::User, "Still there?");
    if let Some(response) = client.send_message(&follow_up).await? {
        println!("   → {}", follow_up.text());
        println!("   ← {}\n", response.text());
    }

    println!("3. Shutting down...");
    coordinator.shutdown();
    if let Ok(result) = handle.await {
        result?;
    }
    println!("   ✓ Server stopped");

    Ok(())
}
