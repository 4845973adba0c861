//! HTTP routes
//!
//! Each area exposes a `create_*_router`; `create_app` merges them and adds
//! the shared layers.

pub mod admin_routes;
pub mod catalog_routes;
pub mod export_routes;
pub mod rental_routes;
pub mod review_routes;
pub mod tech_routes;
pub mod wallet_routes;

use axum::{extract::DefaultBodyLimit, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health))
        .merge(catalog_routes::create_catalog_router())
        .merge(rental_routes::create_rental_router())
        .merge(wallet_routes::create_wallet_router())
        .merge(review_routes::create_review_router())
        .merge(tech_routes::create_tech_router())
        .merge(export_routes::create_export_router())
        .nest("/admin", admin_routes::create_admin_router())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
