// HTTP routes: stats API, version, dashboard assets

mod http;

use axum::{Router, routing::get};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use crate::config::AppConfig;
use crate::snapshot::SnapshotBuilder;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) builder: Arc<SnapshotBuilder>,
}

pub fn app(builder: Arc<SnapshotBuilder>, config: &AppConfig) -> Router {
    let static_dir = Path::new(&config.paths.static_dir);
    let state = AppState { builder };
    Router::new()
        .route("/api/stats", get(http::stats_handler)) // GET /api/stats
        .route("/version", get(http::version_handler)) // GET /version
        .nest_service("/static", ServeDir::new(static_dir.join("static")))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
