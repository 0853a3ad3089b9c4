use axum::{Router, http::Uri, routing::get};

use crate::{
    error::{AppError, EntityKind},
    state::AppState,
};

pub mod admin;
pub mod doc;
pub mod health;
pub mod orders;
pub mod params;
pub mod stores;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/stores", stores::router())
        .nest("/orders", orders::router())
        .nest("/admin", admin::router())
}

/// Full application router with state bound; middleware layers are added by the binary.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "no route");
    AppError::not_found(EntityKind::Route)
}
