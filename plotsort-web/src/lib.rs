//! plotsort-web library
//!
//! Serves a directory of images through a single-page viewer and records the
//! label assigned to each image as per-session JSON files.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use plotsort_common::Config;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod page;
pub mod server;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Image root, pattern, selections directory and labels
    pub config: Arc<Config>,
    /// Held for the duration of each save so writes land in arrival order
    pub save_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            save_lock: Arc::new(Mutex::new(())),
        }
    }
}

/// Build application router
///
/// - `GET /`: viewer page with embedded file list and prior state
/// - `POST /save`: persist a session's classification map
/// - everything else: static files from the image root (GET/HEAD), 404 otherwise
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::serve_index).fallback(api::serve_file))
        .route(
            "/save",
            post(api::save_selection).fallback(api::serve_file),
        )
        .fallback(api::serve_file)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
