//! Line-oriented console for running without a TTY
//!
//! Reads one instruction per line and blocks on each inference call. The
//! HTTP endpoint keeps serving from the runtime in the meantime.

use crate::command::executor::CommandExecutor;
use crate::command::relay::CommandRelay;
use crate::core::error::Result;
use crate::llm::client::LlmClient;
use crate::llm::parser::request_commands;
use std::io::{BufRead, Write};
use tokio::runtime::Handle;

/// Process instructions from `input` until EOF or `quit`
pub fn run<R: BufRead, W: Write>(
    handle: &Handle,
    client: &LlmClient,
    relay: &CommandRelay,
    mut input: R,
    mut output: W,
) -> Result<()> {
    writeln!(output, "Type an instruction and press Enter. `quit` or `q` exits.")?;

    loop {
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "q" {
            break;
        }

        tracing::info!("Submitting instruction: {}", line);
        match handle.block_on(request_commands(client, line)) {
            Ok(reply) => {
                let result = CommandExecutor::execute(relay, &reply);
                writeln!(output, "{}", reply.summary())?;
                writeln!(output, "Pending commands: {}", result.pending)?;
            }
            Err(e) => {
                tracing::warn!("Submission failed: {}", e);
                writeln!(output, "Error: {}", e)?;
            }
        }
    }

    Ok(())
}
