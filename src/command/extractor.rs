//! Pull canonical commands out of free-form model replies
//!
//! Reasoning models prefix their answer with a `<think>...</think>` block.
//! That block routinely mentions every command while the model deliberates,
//! so it is cut off before matching.

use crate::command::vocabulary::Command;

/// Opening marker of a reasoning block
pub const THINK_OPEN: &str = "<think>";
/// Closing marker of a reasoning block
pub const THINK_CLOSE: &str = "</think>";

/// Strip reasoning preamble and surrounding whitespace.
///
/// When the reply contains `<think>`, only the text after the last
/// `</think>` is kept. An unterminated block leaves the whole reply.
pub fn normalize_response(text: &str) -> &str {
    if text.contains(THINK_OPEN) {
        text.rsplit(THINK_CLOSE).next().unwrap_or(text).trim()
    } else {
        text.trim()
    }
}

/// Find every command mentioned in `text`.
///
/// Matching is case-insensitive substring search over the variant table.
/// The result is in vocabulary order, not the order of appearance, and
/// holds each command at most once.
pub fn extract_commands(text: &str) -> Vec<Command> {
    let lowered = text.to_lowercase();
    let mut found = Vec::new();

    for command in Command::ALL {
        if let Some(variant) = command.variants().iter().find(|v| lowered.contains(*v)) {
            tracing::trace!(%command, variant, "Matched command variant");
            found.push(command);
        }
    }

    found
}

/// Normalize a raw reply and extract its commands
pub fn extract_from_response(raw: &str) -> Vec<Command> {
    extract_commands(normalize_response(raw))
}
