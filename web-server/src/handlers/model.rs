//! Model status handler

use axum::{extract::State, Json};
use dr_scoring_core::features::LayoutInfo;

use crate::models::ModelStatusResponse;
use crate::AppState;

/// Loaded model metadata, feature layout and scoring counters
pub async fn status(State(state): State<AppState>) -> Json<ModelStatusResponse> {
    Json(ModelStatusResponse {
        loaded: state.model.is_loaded(),
        error: state.model.error().map(str::to_string),
        metadata: state.model.metadata().cloned(),
        layout: LayoutInfo::current(),
        scoring: state.stats.snapshot(),
    })
}
