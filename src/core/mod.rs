pub mod config;
pub mod error;

pub use config::{BridgeConfig, LlmConfig, ServerConfig};
pub use error::{BridgeError, Result};
