//! Async client for the local text-generation server
//!
//! Speaks Ollama's `/api/generate` format by default. Endpoints ending in
//! `/chat/completions` (llama.cpp server, LM Studio, vLLM and friends) are
//! addressed in the OpenAI-compatible chat format instead. One request per
//! call, no streaming, no retry.

use crate::core::config::LlmConfig;
use crate::core::error::{BridgeError, Result};
use crate::llm::prompt::compose_prompt;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// API format type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFormat {
    Ollama,
    OpenAI,
}

/// Async LLM client for making generation calls
pub struct LlmClient {
    client: Client,
    api_url: String,
    model: String,
    api_format: ApiFormat,
}

impl LlmClient {
    /// Create a client with no request timeout
    pub fn new(api_url: String, model: String) -> Self {
        Self::with_client(Client::new(), api_url, model)
    }

    fn with_client(client: Client, api_url: String, model: String) -> Self {
        let api_format = Self::detect_api_format(&api_url);
        Self {
            client,
            api_url,
            model,
            api_format,
        }
    }

    /// Create a client from the `[llm]` configuration section
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BridgeError::LlmError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(
            client,
            config.endpoint.clone(),
            config.model.clone(),
        ))
    }

    /// Detect API format from URL
    fn detect_api_format(url: &str) -> ApiFormat {
        if url.contains("/chat/completions") {
            ApiFormat::OpenAI
        } else {
            ApiFormat::Ollama
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn api_format(&self) -> ApiFormat {
        self.api_format
    }

    /// Send a generation request
    ///
    /// # Arguments
    /// * `system` - Fixed instruction describing the command vocabulary
    /// * `user` - The user's free-text request
    ///
    /// # Returns
    /// The model's generated text, unmodified
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        tracing::debug!(url = %self.api_url, model = %self.model, "Sending generation request");
        match self.api_format {
            ApiFormat::Ollama => self.complete_ollama(system, user).await,
            ApiFormat::OpenAI => self.complete_openai(system, user).await,
        }
    }

    async fn complete_ollama(&self, system: &str, user: &str) -> Result<String> {
        let request = OllamaRequest {
            model: self.model.clone(),
            prompt: compose_prompt(system, user),
            stream: false,
        };

        let response = self
            .client
            .post(&self.api_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BridgeError::LlmError(e.to_string()))?;

        let response = check_status(response).await?;

        let completion: OllamaResponse = response
            .json()
            .await
            .map_err(|e| BridgeError::LlmError(e.to_string()))?;

        Ok(completion.response)
    }

    async fn complete_openai(&self, system: &str, user: &str) -> Result<String> {
        let request = OpenAIRequest {
            model: self.model.clone(),
            stream: false,
            messages: vec![
                Message {
                    role: "system".into(),
                    content: system.into(),
                },
                Message {
                    role: "user".into(),
                    content: user.into(),
                },
            ],
        };

        let response = self
            .client
            .post(&self.api_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BridgeError::LlmError(e.to_string()))?;

        let response = check_status(response).await?;

        let completion: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| BridgeError::LlmError(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| BridgeError::LlmError("Empty response".into()))
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), %body, "Inference server rejected request");
    Err(BridgeError::UpstreamStatus(status.as_u16()))
}

// Ollama generate format
#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaResponse {
    #[serde(default)]
    response: String,
}

// OpenAI-compatible chat format
#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    stream: bool,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}
