//! Diabetic Retinopathy Prediction - Web Server
//!
//! Browser form and JSON API around the scoring core.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    DR PREDICTION WEB                     │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────┐  ┌──────────────────────┐  │
//! │  │  HTML     │  │  JSON     │  │  Report download     │  │
//! │  │  form     │  │  API      │  │  (text/plain)        │  │
//! │  └─────┬─────┘  └─────┬─────┘  └──────────┬───────────┘  │
//! │        └──────────────┼───────────────────┘              │
//! │                       ▼                                  │
//! │          ┌─────────────────────────┐                     │
//! │          │ Scorer (dr-scoring-core)│                     │
//! │          │ classifier loaded once  │                     │
//! │          └─────────────────────────┘                     │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod state;
pub mod views;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};
pub use state::{AppState, ModelState, ScoringStats};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let permissive_cors = !state.config.is_production();

    // Browser routes
    let page_routes = Router::new()
        .route("/", get(handlers::form::index))
        .route("/predict", post(handlers::form::submit))
        .route("/report", get(handlers::predict::download_report));

    // JSON API
    let api_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/predict", post(handlers::predict::predict))
        .route("/api/v1/report", post(handlers::predict::report))
        .route("/api/v1/model", get(handlers::model::status));

    let router = Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    let router = if permissive_cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
    } else {
        router
    };

    router.with_state(state)
}
