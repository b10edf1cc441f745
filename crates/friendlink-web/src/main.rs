//! friendlink-web — Axum development server.
//! Applies the configured rewrite rules and serves the built frontend.

mod server;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use friendlink_core::config::Config;

use server::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let project_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = Config::load_from_dir(&project_root)?;

    for rewrite in &config.rewrites {
        info!("Rewrite {} -> {}", rewrite.source, rewrite.destination);
    }

    let http = reqwest::Client::builder()
        .build()
        .context("Failed to build proxy client")?;

    let state = Arc::new(AppState {
        http,
        rewrites: config.rewrites.clone(),
        project_root,
    });
    let app = server::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    eprintln!("\n  Open http://localhost:{}/ to add a friend\n", config.port);

    // Graceful shutdown on Ctrl+C
    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    info!("Server stopped.");
    Ok(())
}
