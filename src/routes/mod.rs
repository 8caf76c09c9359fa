//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the upload and design API endpoints, serves stored documents as
//! static files under `/uploads`, and applies permissive CORS so the
//! dashboard can run on a separate origin during development.

pub mod designs;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let uploads_service = ServeDir::new(state.uploads_dir.as_ref().clone());

    Router::new()
        .route("/upload", post(designs::upload_design))
        .route("/api/designs", get(designs::list_designs))
        .route(
            "/api/designs/{id}",
            get(designs::get_design).delete(designs::delete_design),
        )
        .route("/health", get(designs::health))
        .nest_service("/uploads", uploads_service)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
