//! Inference gateway: client, fixed instruction, and reply parsing

pub mod client;
pub mod parser;
pub mod prompt;

pub use client::{ApiFormat, LlmClient};
pub use parser::{request_commands, ParsedReply};
