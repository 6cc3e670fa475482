//! Central Configuration Constants
//!
//! Single source of truth for defaults shared by the scoring core and the
//! web form. To change a form default or range, only edit this file.

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Diabetic Retinopathy Prediction";

/// Default classifier artifact, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "models/dr_logistic_model.json";

/// File name offered for the downloadable report
pub const REPORT_FILE_NAME: &str = "dr_prediction_report.txt";

// ============================================
// Form defaults
// ============================================

pub const DEFAULT_AGE: u32 = 50;
pub const DEFAULT_SYSTOLIC_BP: f64 = 120.0;
pub const DEFAULT_DIASTOLIC_BP: f64 = 80.0;
pub const DEFAULT_CHOLESTEROL: f64 = 90.0;

// ============================================
// Accepted input ranges (inclusive)
// ============================================

pub const AGE_MIN: u32 = 30;
pub const AGE_MAX: u32 = 105;
pub const SYSTOLIC_BP_MIN: f64 = 70.0;
pub const SYSTOLIC_BP_MAX: f64 = 130.0;
pub const DIASTOLIC_BP_MIN: f64 = 60.0;
pub const DIASTOLIC_BP_MAX: f64 = 120.0;
pub const CHOLESTEROL_MIN: f64 = 70.0;
pub const CHOLESTEROL_MAX: f64 = 130.0;

pub const AGE_RANGE: (u32, u32) = (AGE_MIN, AGE_MAX);
pub const SYSTOLIC_BP_RANGE: (f64, f64) = (SYSTOLIC_BP_MIN, SYSTOLIC_BP_MAX);
pub const DIASTOLIC_BP_RANGE: (f64, f64) = (DIASTOLIC_BP_MIN, DIASTOLIC_BP_MAX);
pub const CHOLESTEROL_RANGE: (f64, f64) = (CHOLESTEROL_MIN, CHOLESTEROL_MAX);

/// Default decision threshold for the positive class
pub const DEFAULT_DECISION_THRESHOLD: f64 = 0.5;

/// Allowed deviation of the class probabilities' sum from 1.0
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-3;
