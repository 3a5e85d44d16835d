//! Command Bridge - natural language instructions to polled game commands

pub mod command;
pub mod core;
pub mod llm;
pub mod server;
pub mod ui;
