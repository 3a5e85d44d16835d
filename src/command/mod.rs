//! Command pipeline
//!
//! Model reply -> normalize -> extract -> CommandExecutor -> CommandRelay -> poller

pub mod executor;
pub mod extractor;
pub mod relay;
pub mod vocabulary;

pub use executor::{CommandExecutor, ExecutionResult};
pub use extractor::{extract_commands, extract_from_response, normalize_response};
pub use relay::CommandRelay;
pub use vocabulary::Command;
