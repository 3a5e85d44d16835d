//! Turn a user instruction into queued-ready commands
//!
//! The model answers in prose. Instead of trusting it to emit exact tokens,
//! its reply is scanned against the variant whitelist so only the closed
//! command set ever reaches the game.

use crate::command::extractor::extract_from_response;
use crate::command::vocabulary::{join_commands, Command};
use crate::core::error::Result;
use crate::llm::client::LlmClient;
use crate::llm::prompt::SYSTEM_PROMPT;

/// A model reply together with the commands found in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    /// Generated text exactly as the server returned it
    pub raw: String,
    /// Recognized commands in vocabulary order
    pub commands: Vec<Command>,
}

impl ParsedReply {
    pub fn from_raw(raw: String) -> Self {
        let commands = extract_from_response(&raw);
        Self { raw, commands }
    }

    /// Human-readable report shown after a submission
    pub fn summary(&self) -> String {
        format!(
            "AI reply: {}\n\nRecognized commands: {}",
            self.raw,
            join_commands(&self.commands)
        )
    }
}

/// Ask the model about `input` and extract the commands from its answer
pub async fn request_commands(client: &LlmClient, input: &str) -> Result<ParsedReply> {
    let raw = client.complete(SYSTEM_PROMPT, input).await?;
    let reply = ParsedReply::from_raw(raw);
    tracing::debug!(
        commands = %join_commands(&reply.commands),
        "Extracted commands from reply"
    );
    Ok(reply)
}
