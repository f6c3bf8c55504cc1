//! Axum API server binary.

use std::net::SocketAddr;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sreel_api::{create_router, ApiConfig, AppState};
use sreel_gen::GenConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("sreel=info".parse().context("Invalid log directive")?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting sreel-api");

    // Load configuration. Absent generation credentials are not fatal here;
    // the affected calls fail per scene instead.
    let config = ApiConfig::from_env();
    let gen_config = GenConfig::from_env();
    info!("API config: host={}, port={}", config.host, config.port);
    if gen_config.gemini_api_key.is_none() {
        info!("GEMINI_API_KEY not set; storyboard generation calls will fail cleanly");
    }
    if gen_config.minimax_api_key.is_none() {
        info!("MINIMAX_API_KEY not set; batch-idea generation calls will fail cleanly");
    }

    // Create application state and router
    let state = AppState::new(config.clone(), &gen_config);
    let app = create_router(state);

    // Bind and serve
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid bind address")?;

    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind listener")?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    info!("Received shutdown signal");
}
