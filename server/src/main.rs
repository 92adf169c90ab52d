//! HTTP server entrypoint for chat-relay
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use relay_application::{ChatUseCase, CompletionGateway, RunCommandUseCase};
use relay_infrastructure::{
    AgentDriverGateway, BackendKind, BedrockGateway, ConfigLoader, FileCommandSource,
    MemoryConversationStore,
};
use relay_server::{app_with_state, state::AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chat-relay", about = "HTTP relay for LLM chat sessions", version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the completion backend (bedrock or driver)
    #[arg(short, long)]
    backend: Option<BackendKind>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut config = ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(backend) = cli.backend {
        config.backend.kind = backend;
    }

    info!("Starting chat-relay");

    // === Dependency Injection ===
    let store = Arc::new(MemoryConversationStore::new());

    let mut driver_abort: Option<CancellationToken> = None;
    let gateway: Arc<dyn CompletionGateway> = match config.backend.kind {
        BackendKind::Bedrock => Arc::new(
            BedrockGateway::new(&config.bedrock, &config.backend.model())
                .await
                .context("Failed to initialize Bedrock backend")?,
        ),
        BackendKind::Driver => {
            let driver = Arc::new(AgentDriverGateway::new(config.driver.clone()));
            driver_abort = Some(driver.abort_handle());
            driver
        }
    };

    info!(
        backend = ?config.backend.kind,
        origin = ?gateway.origin(),
        model = %config.backend.model,
        "Completion backend ready"
    );

    let commands = Arc::new(FileCommandSource::new(config.commands.dir.clone()));

    let chat = Arc::new(ChatUseCase::new(
        store.clone(),
        gateway.clone(),
        config.backend.system_prompt.clone(),
    ));
    let run_command = Arc::new(RunCommandUseCase::new(
        store.clone(),
        gateway.clone(),
        commands,
    ));

    let state = AppState::new(chat, run_command, store);
    let app = app_with_state(state);

    let addr = format!("{}:{}", config.server.bind, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(driver_abort))
        .await
        .context("Server error")?;

    Ok(())
}

/// Wait for Ctrl-C, then cancel any in-flight driver exchanges so their
/// child processes get their bounded grace period before the kill.
async fn shutdown_signal(driver_abort: Option<CancellationToken>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
    if let Some(token) = driver_abort {
        token.cancel();
    }
}
