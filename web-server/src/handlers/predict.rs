//! Prediction and report handlers

use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use dr_scoring_core::{format_report, PredictionResult, RawVitals, REPORT_FILE_NAME};

use crate::models::{PredictionResponse, VitalsForm};
use crate::{AppResult, AppState};

/// Validate the submission and score it once, counting it in the stats
pub fn run_scoring(state: &AppState, form: VitalsForm) -> AppResult<(RawVitals, PredictionResult)> {
    let raw = form.into_vitals()?;
    let scorer = state.scorer()?;

    let start = Instant::now();
    match scorer.score(&raw) {
        Ok(result) => {
            state.stats.record_success(start.elapsed());
            tracing::info!(
                "Prediction: label={} confidence={:.2}",
                result.label.class_index(),
                result.confidence
            );
            Ok((raw, result))
        }
        Err(e) => {
            state.stats.record_failure();
            Err(e.into())
        }
    }
}

/// Score a submission the result page already counted
fn rescore(state: &AppState, form: VitalsForm) -> AppResult<PredictionResult> {
    let raw = form.into_vitals()?;
    Ok(state.scorer()?.score(&raw)?)
}

/// Plain-text report as a file download
pub fn report_response(result: &PredictionResult) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", REPORT_FILE_NAME),
            ),
        ],
        format_report(result),
    )
        .into_response()
}

/// Score vitals posted as JSON
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<VitalsForm>, JsonRejection>,
) -> AppResult<Json<PredictionResponse>> {
    let Json(form) = payload?;
    let (raw, result) = run_scoring(&state, form)?;
    Ok(Json(PredictionResponse::new(raw, &result)))
}

/// Score vitals posted as JSON and return only the report file
pub async fn report(
    State(state): State<AppState>,
    payload: Result<Json<VitalsForm>, JsonRejection>,
) -> AppResult<Response> {
    let Json(form) = payload?;
    let (_, result) = run_scoring(&state, form)?;
    Ok(report_response(&result))
}

/// Report download linked from the result page
pub async fn download_report(
    State(state): State<AppState>,
    query: Result<Query<VitalsForm>, QueryRejection>,
) -> AppResult<Response> {
    let Query(form) = query?;
    let result = rescore(&state, form)?;
    Ok(report_response(&result))
}
