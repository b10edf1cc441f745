//! Web server — Axum router + shared state.

pub mod proxy;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use friendlink_core::config::Rewrite;

/// Shared application state.
pub struct AppState {
    pub http: reqwest::Client,
    pub rewrites: Vec<Rewrite>,
    pub project_root: PathBuf,
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::very_permissive();

    let mut app = Router::new()
        .merge(proxy::routes(&state.rewrites))
        .layer(cors)
        .with_state(state.clone());

    // Serve frontend static files if dist directory exists
    let frontend_dist = state.project_root.join("crates/friendlink-web/frontend/dist");
    if frontend_dist.is_dir() {
        let index_html = frontend_dist.join("index.html");
        app = app.fallback_service(
            ServeDir::new(&frontend_dist).not_found_service(ServeFile::new(index_html)),
        );
    }

    app
}
