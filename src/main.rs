//! uiforge binary entry point.

use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use uiforge::cli::{Cli, Commands};
use uiforge::config::ServerConfig;
use uiforge::error::UiForgeError;
use uiforge::generation::GenerationBridge;
use uiforge::provider::anthropic::AnthropicProvider;
use uiforge::server::{FeatureFlags, UiForgeServer};
use uiforge::session::SessionTracker;
use uiforge::transport;

#[tokio::main]
async fn main() {
    // stdout carries the MCP protocol; logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), UiForgeError> {
    let mut config = ServerConfig::from_env()?;
    if let Some(model) = cli.model.clone() {
        config.model = model;
    }
    let command = cli.command();
    info!(?config, "starting uiforge");

    let provider = AnthropicProvider::new(&config.model, &config.api_key, config.base_url.clone())?;
    let bridge = GenerationBridge::new(Arc::new(provider));
    let sessions = SessionTracker::with_policy(config.eviction_policy());
    let features = FeatureFlags {
        http_transport: matches!(command, Commands::Http(_)),
        ..FeatureFlags::default()
    };
    let server = UiForgeServer::with_builtin_tools(bridge, sessions)?.with_features(features);

    match command {
        Commands::Stdio => transport::serve_stdio(server).await,
        Commands::Http(args) => {
            let addr = args.addr.unwrap_or(config.http_addr);
            let shutdown = CancellationToken::new();
            let signal = shutdown.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("received Ctrl-C");
                    signal.cancel();
                }
            });
            transport::http::run(addr, server, shutdown).await
        }
    }
}
