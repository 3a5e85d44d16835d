//! End-to-end tests against a mock inference server
//!
//! A small axum app on an ephemeral port stands in for Ollama (or an
//! OpenAI-compatible server), so the real client, parser, relay and polling
//! endpoint are exercised over HTTP.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use command_bridge::command::{Command, CommandExecutor, CommandRelay};
use command_bridge::core::config::{LlmConfig, ServerConfig};
use command_bridge::core::error::BridgeError;
use command_bridge::llm::{request_commands, ApiFormat, LlmClient};
use command_bridge::server;
use command_bridge::ui::headless;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

const REPLY: &str = "<think>Crouch first? No.</think>\nMeow! I move left, then I jump.";

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<Value>>>,
}

async fn ollama_generate(State(state): State<MockState>, Json(body): Json<Value>) -> Json<Value> {
    state.requests.lock().unwrap().push(body);
    Json(json!({ "model": "mock", "response": REPLY, "done": true }))
}

async fn openai_chat(State(state): State<MockState>, Json(body): Json<Value>) -> Json<Value> {
    state.requests.lock().unwrap().push(body);
    Json(json!({
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": "I shrink." } }]
    }))
}

async fn unavailable() -> (StatusCode, &'static str) {
    (StatusCode::SERVICE_UNAVAILABLE, "model is loading")
}

async fn spawn_mock() -> (SocketAddr, MockState) {
    let state = MockState::default();
    let app = Router::new()
        .route("/api/generate", post(ollama_generate))
        .route("/v1/chat/completions", post(openai_chat))
        .route("/broken/api/generate", post(unavailable))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, state)
}

fn client_for(addr: SocketAddr, path: &str) -> LlmClient {
    LlmClient::new(format!("http://{}{}", addr, path), "mock-model".into())
}

#[tokio::test]
async fn test_ollama_request_and_reply() {
    let (addr, state) = spawn_mock().await;
    let client = client_for(addr, "/api/generate");

    let reply = request_commands(&client, "go left and hop").await.unwrap();
    assert_eq!(reply.raw, REPLY);
    assert_eq!(reply.commands, vec![Command::MoveLeft, Command::Jump]);

    let requests = state.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let body = &requests[0];
    assert_eq!(body["model"], "mock-model");
    assert_eq!(body["stream"], false);
    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.contains("\"move-left\""));
    assert!(prompt.ends_with("User request: go left and hop"));
}

#[tokio::test]
async fn test_openai_compatible_endpoint() {
    let (addr, state) = spawn_mock().await;
    let client = client_for(addr, "/v1/chat/completions");
    assert_eq!(client.api_format(), ApiFormat::OpenAI);

    let reply = request_commands(&client, "get small").await.unwrap();
    assert_eq!(reply.commands, vec![Command::Shrink]);

    let requests = state.requests.lock().unwrap();
    let messages = requests[0]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[1]["role"], "user");
    assert_eq!(messages[1]["content"], "get small");
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let (addr, _state) = spawn_mock().await;
    let client = client_for(addr, "/broken/api/generate");

    let result = request_commands(&client, "jump").await;
    assert!(matches!(result, Err(BridgeError::UpstreamStatus(503))));
}

#[tokio::test]
async fn test_unreachable_server_is_reported() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr, "/api/generate");
    let result = request_commands(&client, "jump").await;
    assert!(matches!(result, Err(BridgeError::LlmError(_))));
}

#[tokio::test]
async fn test_client_from_config_talks_to_endpoint() {
    let (addr, _state) = spawn_mock().await;
    let config = LlmConfig {
        endpoint: format!("http://{}/api/generate", addr),
        model: "mock-model".into(),
        timeout_secs: Some(10),
    };
    let client = LlmClient::from_config(&config).unwrap();

    let reply = request_commands(&client, "anything").await.unwrap();
    assert_eq!(reply.commands, vec![Command::MoveLeft, Command::Jump]);
}

#[tokio::test]
async fn test_submission_to_poll_over_http() {
    let (addr, _state) = spawn_mock().await;
    let client = client_for(addr, "/api/generate");
    let relay = Arc::new(CommandRelay::new());

    let config = ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
    };
    let listener = server::bind(&config).await.unwrap();
    let bridge_addr = listener.local_addr().unwrap();
    tokio::spawn(server::serve(listener, Arc::clone(&relay)));

    let reply = request_commands(&client, "left then jump").await.unwrap();
    let result = CommandExecutor::execute(&relay, &reply);
    assert_eq!(result.pending, 2);

    let http = reqwest::Client::new();
    let url = format!("http://{}/generate", bridge_addr);
    let mut seen = Vec::new();
    for _ in 0..3 {
        let body: Value = http
            .post(&url)
            .json(&json!({ "prompt": "check" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["success"], true);
        seen.push(body["response"].as_str().unwrap().to_string());
    }
    assert_eq!(seen, vec!["move-left", "jump", "jump"]);
}

#[test]
fn test_headless_session() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (addr, state) = rt.block_on(spawn_mock());
    let client = client_for(addr, "/api/generate");
    let relay = CommandRelay::new();

    let input = "\n   \nwalk left and jump\nquit\nnever sent\n";
    let mut output = Vec::new();
    headless::run(rt.handle(), &client, &relay, input.as_bytes(), &mut output).unwrap();

    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Recognized commands: move-left, jump"));
    assert!(output.contains("Pending commands: 2"));
    assert_eq!(state.requests.lock().unwrap().len(), 1);
    assert_eq!(relay.pending(), 2);
}

#[test]
fn test_headless_reports_upstream_error() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (addr, _state) = rt.block_on(spawn_mock());
    let client = client_for(addr, "/broken/api/generate");
    let relay = CommandRelay::new();

    let mut output = Vec::new();
    headless::run(rt.handle(), &client, &relay, "jump\n".as_bytes(), &mut output).unwrap();

    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Error: Inference server returned status 503"));
    assert_eq!(relay.pending(), 0);
}
