//! Prediction response models

use chrono::Utc;
use dr_scoring_core::features::LayoutInfo;
use dr_scoring_core::{
    format_report, DerivedFeatures, Label, ModelMetadata, PredictionResult, RawVitals,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::StatsSnapshot;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub id: Uuid,
    pub scored_at: i64,
    pub input: RawVitals,
    pub label: Label,
    pub label_text: String,
    pub summary: String,
    pub confidence: f64,
    pub derived: DerivedFeatures,
    pub report: String,
}

impl PredictionResponse {
    pub fn new(input: RawVitals, result: &PredictionResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            scored_at: Utc::now().timestamp(),
            input,
            label: result.label,
            label_text: result.label.report_text().to_string(),
            summary: result.summary(),
            confidence: result.confidence,
            derived: result.derived,
            report: format_report(result),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelStatusResponse {
    pub loaded: bool,
    pub error: Option<String>,
    pub metadata: Option<ModelMetadata>,
    pub layout: LayoutInfo,
    pub scoring: StatsSnapshot,
}
