//! Command Bridge - Entry Point
//!
//! Starts the polling endpoint on a background runtime, then runs the
//! submission console on the main thread until the user quits.

use command_bridge::command::CommandRelay;
use command_bridge::core::config::BridgeConfig;
use command_bridge::core::error::Result;
use command_bridge::llm::LlmClient;
use command_bridge::server;
use command_bridge::ui::{headless, terminal};

use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Forward natural-language instructions to a local LLM and serve the
/// recognized commands to a polling game client
#[derive(Parser, Debug)]
#[command(name = "command-bridge")]
#[command(about = "Relay LLM-extracted commands to a polling game client")]
struct Args {
    /// TOML configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Override the polling endpoint port
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// Read instructions from stdin instead of the terminal console
    #[arg(long)]
    headless: bool,

    /// Log file used while the terminal console owns the screen
    #[arg(long, default_value = "command-bridge.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = init_tracing(&args);

    tracing::info!("Command Bridge starting...");

    let mut config = match &args.config {
        Some(path) => BridgeConfig::load(path)?,
        None => BridgeConfig::default(),
    };
    config.apply_env()?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let rt = Runtime::new()?;
    let relay = Arc::new(CommandRelay::new());
    let client = Arc::new(LlmClient::from_config(&config.llm)?);

    // Bind up front so a taken port fails before the console opens
    let listener = rt.block_on(server::bind(&config.server))?;
    let server_relay = Arc::clone(&relay);
    rt.spawn(async move {
        if let Err(e) = server::serve(listener, server_relay).await {
            tracing::error!("Polling endpoint stopped: {}", e);
        }
    });

    tracing::info!(
        "Make sure the inference server is running at {}",
        client.api_url()
    );

    if args.headless {
        let stdin = io::stdin();
        headless::run(rt.handle(), &client, &relay, stdin.lock(), io::stdout())?;
    } else {
        terminal::run(rt.handle().clone(), client, relay)?;
    }

    tracing::info!("Command Bridge shutting down");
    Ok(())
}

/// Headless mode logs to stderr; the terminal console logs to a file so it
/// doesn't draw over the screen.
fn init_tracing(args: &Args) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("command_bridge=info,tower_http=info"));

    if args.headless {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_env_filter(filter)
            .init();
        return None;
    }

    let dir = args
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = args
        .log_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "command-bridge.log".into());

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    Some(guard)
}
