//! smyf-reg library - registration form service
//!
//! Serves the entry form, stores submissions, and renders the report.

use axum::Router;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Store handle shared by every request
    pub db: SqlitePool,
    /// Directory holding `index.html` and other static assets
    pub public_dir: PathBuf,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            db,
            public_dir: public_dir.into(),
        }
    }

    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }
}

/// Build application router
///
/// Static assets are the fallback, so `/submit` and `/retrieve` win over any
/// file of the same name.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let public_dir = state.public_dir().to_path_buf();

    Router::new()
        .route("/submit", post(api::submit))
        .route("/retrieve", get(api::retrieve))
        .route_service("/", api::index_service(&public_dir))
        .fallback_service(api::asset_service(&public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
