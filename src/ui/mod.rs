//! Submission surfaces: the terminal console and its headless fallback

pub mod headless;
pub mod render;
pub mod state;
pub mod terminal;

pub use state::{ConsoleState, LogCategory, LogEntry};
