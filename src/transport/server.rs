//! HTTP server exposing the single A2A message endpoint

use crate::config::ServerConfig;
use crate::error::Result;
use crate::protocol::codec::parse_object_or_empty;
use crate::protocol::{JsonCodec, MessageHandler};
use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use futures::FutureExt;
use serde_json::{json, Value};
use std::any::Any;
use std::future::Future;
use std::net::SocketAddr;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

/// Server state
#[derive(Clone)]
pub struct ServerState {
    pub handler: Arc<dyn MessageHandler>,
    pub endpoint_path: Arc<str>,
    pub max_body_size: usize,
}

impl ServerState {
    /// Literal match against the endpoint, with or without one trailing slash
    fn matches_endpoint(&self, path: &str) -> bool {
        if path == &*self.endpoint_path {
            return true;
        }
        match path.strip_suffix('/') {
            Some(stripped) => !stripped.is_empty() && stripped == &*self.endpoint_path,
            None => false,
        }
    }
}

/// Create the router serving `config.endpoint_path`, with and without a
/// trailing slash. Every other path is a 404 and every other method a 405.
///
/// The path is compared literally, so characters such as `:` or `*` carry
/// no routing meaning.
pub fn create_router(config: &ServerConfig, handler: Arc<dyn MessageHandler>) -> Router {
    let state = ServerState {
        handler,
        endpoint_path: Arc::from(config.normalized_endpoint_path()),
        max_body_size: config.max_body_size_bytes(),
    };

    Router::new()
        .fallback(route_request)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Routing check, then method check, then the A2A exchange
async fn route_request(
    State(state): State<ServerState>,
    method: Method,
    uri: Uri,
    body: Body,
) -> Response {
    if !state.matches_endpoint(uri.path()) {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    }
    if method != Method::POST {
        return (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response();
    }
    handle_a2a(&state, body).await
}

/// A2A endpoint: lenient decode, dispatch, encode
async fn handle_a2a(state: &ServerState, body: Body) -> Response {
    let bytes = match to_bytes(body, state.max_body_size).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Could not read request body, treating it as empty: {}", e);
            Default::default()
        }
    };

    let (status, body) = dispatch(state.handler.as_ref(), &bytes).await;
    (status, Json(body)).into_response()
}

/// Decode `body`, run the handler and build the reply.
///
/// Handler errors and panics both become a 500 with `{"error": ...}`.
pub async fn dispatch(handler: &dyn MessageHandler, body: &[u8]) -> (StatusCode, Value) {
    let message = JsonCodec::decode(&parse_object_or_empty(body));
    let message_id = message.message_id().to_string();
    debug!("Dispatching message {}", message_id);

    let outcome = AssertUnwindSafe(handler.handle_message(message))
        .catch_unwind()
        .await;

    let failure = match outcome {
        Ok(Ok(reply)) => {
            debug!("Handler replied to {} with {}", message_id, reply.message_id());
            return (StatusCode::OK, JsonCodec::encode_reply(&reply));
        }
        Ok(Err(e)) => e.to_string(),
        Err(panic) => panic_message(panic.as_ref()),
    };

    error!("Handler failed for message {}: {}", message_id, failure);
    (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": failure }))
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}

/// A bound A2A server, ready to serve
pub struct A2aServer {
    listener: TcpListener,
    router: Router,
    endpoint_path: String,
}

impl A2aServer {
    /// Bind the listener. Port 0 picks a free port.
    pub async fn bind(config: &ServerConfig, handler: Arc<dyn MessageHandler>) -> Result<Self> {
        let listener = TcpListener::bind(config.bind_addr()).await?;
        let router = create_router(config, handler);

        Ok(Self {
            listener,
            router,
            endpoint_path: config.normalized_endpoint_path(),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// URL a client on this machine can use to reach the endpoint
    pub fn endpoint_url(&self) -> Result<String> {
        let mut addr = self.local_addr()?;
        if addr.ip().is_unspecified() {
            addr.set_ip(std::net::Ipv4Addr::LOCALHOST.into());
        }
        Ok(format!("http://{}{}", addr, self.endpoint_path))
    }

    /// Serve until `signal` resolves, then stop accepting and release the listener
    pub async fn serve_with_shutdown<F>(self, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let url = self.endpoint_url()?;
        info!("A2A server running on {}", url);

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;

        info!("A2A server shut down");
        Ok(())
    }

    /// Serve until Ctrl+C or SIGTERM
    pub async fn run(self) -> Result<()> {
        self.serve_with_shutdown(crate::shutdown::shutdown_signal()).await
    }
}

/// Bind and serve until interrupted
pub async fn run_server(config: &ServerConfig, handler: Arc<dyn MessageHandler>) -> Result<()> {
    A2aServer::bind(config, handler).await?.run().await
}
