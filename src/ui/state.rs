//! Console state management

use crate::command::executor::ExecutionResult;
use crate::command::relay::CommandRelay;
use crate::command::vocabulary::{join_commands, Command};
use crate::llm::parser::ParsedReply;
use std::collections::VecDeque;

/// Maximum transcript entries to keep
const MAX_LOG_ENTRIES: usize = 50;

pub const STATUS_READY: &str = "Ready";
pub const STATUS_PROCESSING: &str = "Processing...";

/// Console UI state
#[derive(Debug)]
pub struct ConsoleState {
    /// Instruction being typed
    pub input: String,
    /// A submission is in flight; input is disabled until it returns
    pub busy: bool,
    /// Status line text
    pub status: String,
    /// Contents of the reply panel
    pub reply_text: String,
    /// Transcript of submissions and outcomes
    pub transcript: VecDeque<LogEntry>,
    /// Commands waiting for the game client
    pub pending: usize,
    /// Last command handed to the game client
    pub last_delivered: Option<Command>,
    pub should_quit: bool,
}

/// An entry in the transcript
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub message: String,
    pub category: LogCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    User,
    Reply,
    Commands,
    Error,
    System,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleState {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            busy: false,
            status: STATUS_READY.to_string(),
            reply_text: String::new(),
            transcript: VecDeque::with_capacity(MAX_LOG_ENTRIES),
            pending: 0,
            last_delivered: None,
            should_quit: false,
        }
    }

    /// Add an entry to the transcript
    pub fn log(&mut self, message: String, category: LogCategory) {
        if self.transcript.len() >= MAX_LOG_ENTRIES {
            self.transcript.pop_front();
        }
        self.transcript.push_back(LogEntry { message, category });
    }

    pub fn push_char(&mut self, c: char) {
        if !self.busy {
            self.input.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if !self.busy {
            self.input.pop();
        }
    }

    /// Start a submission from the current input.
    ///
    /// Returns the trimmed instruction, or `None` when the input is blank or
    /// a submission is already running. On success the input is cleared and
    /// disabled.
    pub fn begin_submission(&mut self) -> Option<String> {
        if self.busy {
            return None;
        }
        let text = self.input.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();

        self.input.clear();
        self.busy = true;
        self.status = STATUS_PROCESSING.to_string();
        self.log(text.clone(), LogCategory::User);
        Some(text)
    }

    /// Record a successful submission and re-enable input
    pub fn finish_success(&mut self, reply: &ParsedReply, result: &ExecutionResult) {
        self.reply_text = reply.summary();
        self.log(reply.raw.trim().to_string(), LogCategory::Reply);
        if result.queued.is_empty() {
            self.log("No commands recognized".to_string(), LogCategory::System);
        } else {
            self.log(
                format!("Queued: {}", join_commands(&result.queued)),
                LogCategory::Commands,
            );
        }
        self.pending = result.pending;
        self.finish();
    }

    /// Record a failed submission and re-enable input
    pub fn finish_failure(&mut self, error: &str) {
        self.reply_text = format!("Error: {}", error);
        self.log(self.reply_text.clone(), LogCategory::Error);
        self.finish();
    }

    fn finish(&mut self) {
        self.busy = false;
        self.status = STATUS_READY.to_string();
    }

    /// Pull queue statistics from the relay
    pub fn refresh_relay(&mut self, relay: &CommandRelay) {
        self.pending = relay.pending();
        self.last_delivered = relay.last_delivered();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(raw: &str, commands: Vec<Command>) -> (ParsedReply, ExecutionResult) {
        let reply = ParsedReply {
            raw: raw.into(),
            commands: commands.clone(),
        };
        let result = ExecutionResult {
            pending: commands.len(),
            queued: commands,
        };
        (reply, result)
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut state = ConsoleState::new();
        state.input = "   ".into();
        assert_eq!(state.begin_submission(), None);
        assert!(!state.busy);
        assert!(state.transcript.is_empty());
    }

    #[test]
    fn test_begin_submission_disables_input() {
        let mut state = ConsoleState::new();
        state.input = "  walk left  ".into();

        assert_eq!(state.begin_submission(), Some("walk left".to_string()));
        assert!(state.busy);
        assert!(state.input.is_empty());
        assert_eq!(state.status, STATUS_PROCESSING);

        state.push_char('x');
        assert!(state.input.is_empty());
        state.input = "again".into();
        assert_eq!(state.begin_submission(), None);
    }

    #[test]
    fn test_finish_success_reenables_input() {
        let mut state = ConsoleState::new();
        state.input = "jump".into();
        state.begin_submission();

        let (reply, result) = reply("I jump", vec![Command::Jump]);
        state.finish_success(&reply, &result);

        assert!(!state.busy);
        assert_eq!(state.status, STATUS_READY);
        assert_eq!(state.pending, 1);
        assert!(state.reply_text.contains("Recognized commands: jump"));
        assert_eq!(state.transcript.back().unwrap().category, LogCategory::Commands);
    }

    #[test]
    fn test_finish_failure_reenables_input() {
        let mut state = ConsoleState::new();
        state.input = "jump".into();
        state.begin_submission();

        state.finish_failure("Inference server returned status 500");
        assert!(!state.busy);
        assert_eq!(state.reply_text, "Error: Inference server returned status 500");
        assert_eq!(state.transcript.back().unwrap().category, LogCategory::Error);
    }

    #[test]
    fn test_transcript_is_bounded() {
        let mut state = ConsoleState::new();
        for i in 0..(MAX_LOG_ENTRIES + 10) {
            state.log(format!("entry {}", i), LogCategory::System);
        }
        assert_eq!(state.transcript.len(), MAX_LOG_ENTRIES);
        assert_eq!(state.transcript.front().unwrap().message, "entry 10");
    }

    #[test]
    fn test_refresh_relay() {
        let relay = CommandRelay::new();
        relay.enqueue_all(&[Command::Shrink, Command::Stretch]);
        relay.poll();

        let mut state = ConsoleState::new();
        state.refresh_relay(&relay);
        assert_eq!(state.pending, 1);
        assert_eq!(state.last_delivered, Some(Command::Shrink));
    }
}
