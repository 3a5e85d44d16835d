//! Bridge configuration
//!
//! Defaults target a stock local Ollama install and a game client polling
//! port 5000. A TOML file may override them, and environment variables
//! override the file.

use crate::core::error::{BridgeError, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Interface the polling endpoint binds to
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Port the game client polls
pub const DEFAULT_PORT: u16 = 5000;
/// Ollama's non-streaming generate endpoint
pub const DEFAULT_LLM_ENDPOINT: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_LLM_MODEL: &str = "deepseek-r1:latest";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
}

/// Polling endpoint settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Inference gateway settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Full URL of the generation endpoint
    ///
    /// URLs containing `/chat/completions` are spoken to in the
    /// OpenAI-compatible chat format, anything else in Ollama's
    /// generate format.
    pub endpoint: String,
    /// Model identifier passed through to the server
    pub model: String,
    /// Request timeout. `None` waits for the server indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// `host:port` string accepted by `TcpListener::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_LLM_ENDPOINT.into(),
            model: DEFAULT_LLM_MODEL.into(),
            timeout_secs: None,
        }
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl BridgeConfig {
    /// Parse a TOML document. Missing sections and keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BridgeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply overrides from the process environment
    ///
    /// Recognized: BRIDGE_HOST, BRIDGE_PORT, LLM_API_URL, LLM_MODEL,
    /// LLM_TIMEOUT_SECS
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("BRIDGE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("BRIDGE_PORT") {
            self.server.port = port.trim().parse().map_err(|_| {
                BridgeError::ConfigError(format!("BRIDGE_PORT is not a valid port: {}", port))
            })?;
        }
        if let Some(endpoint) = lookup("LLM_API_URL") {
            self.llm.endpoint = endpoint;
        }
        if let Some(model) = lookup("LLM_MODEL") {
            self.llm.model = model;
        }
        if let Some(timeout) = lookup("LLM_TIMEOUT_SECS") {
            let secs: u64 = timeout.trim().parse().map_err(|_| {
                BridgeError::ConfigError(format!(
                    "LLM_TIMEOUT_SECS is not a number of seconds: {}",
                    timeout
                ))
            })?;
            // Zero disables the timeout
            self.llm.timeout_secs = (secs > 0).then_some(secs);
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(BridgeError::ConfigError("server.host is empty".into()));
        }
        if self.llm.endpoint.trim().is_empty() {
            return Err(BridgeError::ConfigError("llm.endpoint is empty".into()));
        }
        if self.llm.model.trim().is_empty() {
            return Err(BridgeError::ConfigError("llm.model is empty".into()));
        }
        if self.llm.timeout_secs == Some(0) {
            return Err(BridgeError::ConfigError(
                "llm.timeout_secs must be positive; omit it to wait indefinitely".into(),
            ));
        }
        Ok(())
    }
}
