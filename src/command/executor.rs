//! Command execution - queues extracted commands for delivery

use crate::command::relay::CommandRelay;
use crate::command::vocabulary::Command;
use crate::llm::parser::ParsedReply;

/// Hands parsed replies to the relay
pub struct CommandExecutor;

impl CommandExecutor {
    /// Queue every command in the reply, in extraction order
    pub fn execute(relay: &CommandRelay, reply: &ParsedReply) -> ExecutionResult {
        relay.enqueue_all(&reply.commands);

        let pending = relay.pending();
        if reply.commands.is_empty() {
            tracing::info!("Reply contained no recognized commands");
        } else {
            tracing::info!(
                queued = reply.commands.len(),
                pending,
                "Queued commands for delivery"
            );
        }

        ExecutionResult {
            queued: reply.commands.clone(),
            pending,
        }
    }
}

/// Result of executing a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Commands added to the queue
    pub queued: Vec<Command>,
    /// Queue length after the commands were added
    pub pending: usize,
}
