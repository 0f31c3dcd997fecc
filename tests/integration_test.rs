//! Integration tests for the A2A bridge
//!
//! Each test runs a real server on an ephemeral local port and talks to it
//! with the real client.

use a2a_bridge::prelude::*;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Helper to create a server config bound to a free local port
fn local_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    }
}

/// Start a server in the background, returning its URL and the shutdown handle
async fn start_server(
    handler: Arc<dyn MessageHandler>,
) -> (String, ShutdownCoordinator, tokio::task::JoinHandle<Result<()>>) {
    let server = A2aServer::bind(&local_config(), handler)
        .await
        .expect("Failed to bind server");
    let url = server.endpoint_url().expect("Failed to read server address");

    let coordinator = ShutdownCoordinator::new();
    let notifier = coordinator.subscribe();
    let handle = tokio::spawn(server.serve_with_shutdown(notifier.wait()));

    (url, coordinator, handle)
}

/// Write a raw HTTP/1.1 request and read the whole response as text
async fn raw_exchange(url: &str, request: &[u8]) -> String {
    let url = reqwest::Url::parse(url).unwrap();
    let addr = format!("{}:{}", url.host_str().unwrap(), url.port().unwrap());
    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();

    let mut response = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut response))
        .await
        .expect("server should close the connection")
        .unwrap();
    String::from_utf8_lossy(&response).into_owned()
}

fn status_line(response: &str) -> &str {
    response.lines().next().unwrap_or_default()
}

fn response_json(response: &str) -> Value {
    let body = response.split("\r\n\r\n").nth(1).unwrap_or_default();
    serde_json::from_str(body).unwrap()
}

#[tokio::test]
async fn test_echo_round_trip() {
    let (url, coordinator, handle) = start_server(Arc::new(EchoHandler)).await;

    let client = A2aClient::new(url.clone()).unwrap();
    let message = Message::new(Role::User, TextContent::new("Hello"));
    let response = client
        .send_message(&message)
        .await
        .expect("Request failed")
        .expect("Reply should be JSON");

    assert_eq!(response.parts.len(), 1);
    assert_eq!(response.parts[0].text, "Hello");

    // The raw reply carries both the content and the parts mirror
    let raw: Value = reqwest::Client::new()
        .post(&url)
        .body(JsonCodec::to_bytes(&message))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(raw["parts"][0]["text"], "Hello");
    assert_eq!(raw["content"]["text"], "Hello");
    assert_eq!(raw["parent_message_id"], message.message_id());

    coordinator.shutdown();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_handler_error_does_not_leak() {
    let handler = FnHandler::new(|message: Message| {
        if message.text() == "A" {
            anyhow::bail!("job search unavailable");
        }
        Ok(message.reply(Role::Agent, format!("handled {}", message.text())))
    });
    let (url, coordinator, handle) = start_server(Arc::new(handler)).await;
    let client = A2aClient::new(url).unwrap();

    let err = client.send_text("A").await.unwrap_err();
    match err {
        A2aError::Transport(TransportError::Status { status, body }) => {
            assert_eq!(status.as_u16(), 500);
            let body: Value = serde_json::from_str(&body).unwrap();
            assert_eq!(body["error"], "job search unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }

    let response = client.send_text("B").await.unwrap().unwrap();
    assert_eq!(response.first_text(), Some("handled B"));

    coordinator.shutdown();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_routing_over_http() {
    let (url, coordinator, handle) = start_server(Arc::new(EchoHandler)).await;
    let base = url.trim_end_matches("/a2a").to_string();
    let http = reqwest::Client::new();

    let status = http.post(format!("{}/a2a/", base)).body("{}").send().await.unwrap().status();
    assert_eq!(status.as_u16(), 200);

    let status = http.post(format!("{}/nope", base)).body("{}").send().await.unwrap().status();
    assert_eq!(status.as_u16(), 404);

    let status = http.get(&url).send().await.unwrap().status();
    assert_eq!(status.as_u16(), 405);

    // A client pointed at the wrong path surfaces the 404
    let client = A2aClient::new(format!("{}/nope", base)).unwrap();
    let err = client.send_text("x").await.unwrap_err();
    match err {
        A2aError::Transport(inner) => assert_eq!(inner.status().map(|s| s.as_u16()), Some(404)),
        other => panic!("unexpected error: {other}"),
    }

    coordinator.shutdown();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_conversation_threading() {
    let (url, coordinator, handle) = start_server(Arc::new(EchoHandler)).await;
    let client = A2aClient::new(url.clone()).unwrap();

    let first = Message::user("step one").with_conversation_id("career-42");
    let raw: Value = reqwest::Client::new()
        .post(&url)
        .body(JsonCodec::to_bytes(&first))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let reply = JsonCodec::decode(&raw);
    assert_eq!(reply.role(), Role::Agent);
    assert_eq!(reply.conversation_id(), Some("career-42"));
    assert_eq!(reply.parent_message_id(), Some(first.message_id()));

    let follow_up = reply.reply(Role::User, "step two");
    let response = client.send_message(&follow_up).await.unwrap().unwrap();
    assert_eq!(response.text(), "step two");

    coordinator.shutdown();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_client_timeout() {
    // Accept connections but never answer
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let silent = tokio::spawn(async move {
        let mut held = Vec::new();
        loop {
            match listener.accept().await {
                Ok((socket, _)) => held.push(socket),
                Err(_) => break,
            }
        }
    });

    let client = A2aClient::with_timeout(format!("http://{}/a2a", addr), Duration::from_secs(1)).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(10), client.send_text("anyone?"))
        .await
        .expect("client should give up on its own");

    match result {
        Err(A2aError::Transport(TransportError::Timeout(after))) => {
            assert_eq!(after, Duration::from_secs(1));
        }
        other => panic!("expected timeout, got {other:?}"),
    }

    silent.abort();
}

#[tokio::test]
async fn test_server_stops_on_shutdown() {
    let (url, coordinator, handle) = start_server(Arc::new(EchoHandler)).await;

    coordinator.shutdown();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server should stop")
        .unwrap()
        .unwrap();

    let client = A2aClient::with_timeout(url, Duration::from_secs(2)).unwrap();
    assert!(client.send_text("late").await.is_err());
}

#[tokio::test]
async fn test_post_without_content_length() {
    let (url, coordinator, handle) = start_server(Arc::new(EchoHandler)).await;

    // No Content-Length and no Transfer-Encoding: the body is empty
    let response = raw_exchange(
        &url,
        b"POST /a2a HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;
    assert!(status_line(&response).contains(" 200 "), "{response}");
    let reply = response_json(&response);
    assert_eq!(reply["role"], "agent");
    assert_eq!(reply["content"]["text"], "");

    coordinator.shutdown();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_chunked_request_body() {
    let (url, coordinator, handle) = start_server(Arc::new(EchoHandler)).await;

    let body = r#"{"content":{"text":"chunky"}}"#;
    let request = format!(
        "POST /a2a HTTP/1.1\r\nHost: localhost\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n{:x}\r\n{}\r\n0\r\n\r\n",
        body.len(),
        body
    );
    let response = raw_exchange(&url, request.as_bytes()).await;
    assert!(status_line(&response).contains(" 200 "), "{response}");
    assert_eq!(response_json(&response)["content"]["text"], "chunky");

    coordinator.shutdown();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_invalid_content_length_rejected_by_http_layer() {
    let (url, coordinator, handle) = start_server(Arc::new(EchoHandler)).await;

    // hyper refuses to frame this request before it reaches the endpoint
    let response = raw_exchange(
        &url,
        b"POST /a2a HTTP/1.1\r\nHost: localhost\r\nContent-Length: abc\r\nConnection: close\r\n\r\n{}",
    )
    .await;
    assert!(status_line(&response).contains(" 400 "), "{response}");

    // The server keeps serving afterwards
    let client = A2aClient::new(url).unwrap();
    let reply = client.send_text("still here").await.unwrap().unwrap();
    assert_eq!(reply.text(), "still here");

    coordinator.shutdown();
    handle.await.unwrap().unwrap();
}

/// Collaborator returning fixed answers for the career pipeline
struct ScriptedAgents;

#[async_trait]
impl CareerAgents for ScriptedAgents {
    async fn infer_role(&self, _resume_text: &str) -> anyhow::Result<String> {
        Ok("Teacher".to_string())
    }

    async fn search_jobs(&self, role: &str, location: &str, _limit: usize) -> anyhow::Result<Vec<JobListing>> {
        let mut job = JobListing::new(role, "Lincoln High");
        job.location = location.to_string();
        Ok(vec![job])
    }

    async fn tailor_resume(&self, resume_text: &str, job: &JobListing) -> anyhow::Result<String> {
        Ok(format!("{resume_text} (tailored for {})", job.company))
    }

    async fn interview_guide(&self, _resume_text: &str, _job: &JobListing) -> anyhow::Result<String> {
        anyhow::bail!("model quota exhausted")
    }

    async fn project_ideas(&self, _role: &str, _job: &JobListing) -> anyhow::Result<String> {
        Ok("Lesson planner\n\nGrading dashboard".to_string())
    }
}

#[tokio::test]
async fn test_career_pipeline_over_http() {
    let sessions = SessionStore::new();
    let handler = CareerHandler::new(Arc::new(ScriptedAgents), sessions.clone());
    let (url, coordinator, handle) = start_server(Arc::new(handler)).await;
    let http = reqwest::Client::new();

    let post = |message: Message| {
        let request = http.post(&url).body(JsonCodec::to_bytes(&message));
        async move {
            let response = request.send().await.unwrap();
            let status = response.status().as_u16();
            (status, response.json::<Value>().await.unwrap())
        }
    };

    let resume = Message::user("Taught algebra for six years").with_metadata("stage", json!("resume"));
    let (status, body) = post(resume).await;
    assert_eq!(status, 200);
    assert_eq!(body["content"]["text"], "Teacher");
    let conversation_id = body["conversation_id"].as_str().unwrap().to_string();

    let step = |stage: &str| {
        Message::user("")
            .with_conversation_id(conversation_id.clone())
            .with_metadata("stage", json!(stage))
    };

    let (_, body) = post(step("job_match").with_metadata("location", json!("Chicago"))).await;
    assert_eq!(body["metadata"]["jobs"][0]["location"], "Chicago");
    assert_eq!(sessions.get(&conversation_id).await.unwrap().jobs.len(), 1);

    let (_, body) = post(step("tailor").with_metadata("job_index", json!(0))).await;
    assert_eq!(body["parts"][0]["text"], "Taught algebra for six years (tailored for Lincoln High)");

    let (status, body) = post(step("interview").with_metadata("job_index", json!(0))).await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "model quota exhausted");

    let (status, body) = post(step("projects").with_metadata("job_index", json!(3))).await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Invalid job_index");

    let (_, body) = post(step("projects").with_metadata("job_index", json!(0))).await;
    assert_eq!(body["metadata"]["project_ideas"], json!(["Lesson planner", "Grading dashboard"]));

    coordinator.shutdown();
    handle.await.unwrap().unwrap();
}
