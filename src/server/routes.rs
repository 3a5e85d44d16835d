//! `POST /generate` - the only route the game client uses
//!
//! The client sends `{"prompt": "check"}` on a timer. Each check pops one
//! command from the relay, falling back to the last delivered command.
//! Any other prompt, including a missing or non-string one, is accepted
//! and answered with an empty response. A body that is not a JSON object
//! is rejected with a 500.

use crate::command::relay::CommandRelay;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

type RelayArc = Arc<CommandRelay>;

/// Prompt value that asks for the next command
pub const CHECK_PROMPT: &str = "check";

/// A poll body: any JSON object, with `prompt` of any type
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub prompt: Option<Value>,
}

impl GenerateRequest {
    /// Accept only JSON objects. Arrays, scalars and `null` are errors.
    pub fn from_body(body: Value) -> Result<Self, String> {
        match body {
            Value::Object(mut fields) => Ok(Self {
                prompt: fields.remove("prompt"),
            }),
            other => Err(format!("Expected a JSON object, got {}", json_kind(&other))),
        }
    }

    /// Whether the prompt is exactly the string `check`
    pub fn is_check(&self) -> bool {
        matches!(&self.prompt, Some(Value::String(p)) if p == CHECK_PROMPT)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn failure(error: String) -> (StatusCode, Json<GenerateResponse>) {
    warn!("Malformed poll request: {}", error);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(GenerateResponse::failure(error)),
    )
}

/// Body of every `/generate` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateResponse {
    pub fn ok(response: impl Into<String>) -> Self {
        Self {
            success: true,
            response: Some(response.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            response: None,
            error: Some(error.into()),
        }
    }
}

pub fn generate_routes() -> Router<RelayArc> {
    Router::new().route("/generate", post(generate))
}

async fn generate(
    State(relay): State<RelayArc>,
    payload: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<GenerateResponse>) {
    let req = match payload {
        Ok(Json(body)) => match GenerateRequest::from_body(body) {
            Ok(req) => req,
            Err(error) => return failure(error),
        },
        Err(rejection) => return failure(rejection.body_text()),
    };

    debug!("Received prompt: {:?}", req.prompt);

    if !req.is_check() {
        return (StatusCode::OK, Json(GenerateResponse::ok("")));
    }

    let response = relay
        .poll()
        .map(|command| command.as_str())
        .unwrap_or_default();
    (StatusCode::OK, Json(GenerateResponse::ok(response)))
}
