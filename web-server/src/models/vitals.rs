//! Vitals form model

use dr_scoring_core::constants::{
    AGE_MAX, AGE_MIN, CHOLESTEROL_MAX, CHOLESTEROL_MIN, DEFAULT_AGE, DEFAULT_CHOLESTEROL,
    DEFAULT_DIASTOLIC_BP, DEFAULT_SYSTOLIC_BP, DIASTOLIC_BP_MAX, DIASTOLIC_BP_MIN,
    SYSTOLIC_BP_MAX, SYSTOLIC_BP_MIN,
};
use dr_scoring_core::RawVitals;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::{AppError, AppResult};

/// Submitted patient details. Missing fields take the form defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct VitalsForm {
    #[serde(default = "default_age")]
    #[validate(range(min = AGE_MIN, max = AGE_MAX))]
    pub age: u32,

    #[serde(default = "default_systolic_bp")]
    #[validate(range(min = SYSTOLIC_BP_MIN, max = SYSTOLIC_BP_MAX))]
    pub systolic_bp: f64,

    #[serde(default = "default_diastolic_bp")]
    #[validate(range(min = DIASTOLIC_BP_MIN, max = DIASTOLIC_BP_MAX))]
    pub diastolic_bp: f64,

    #[serde(default = "default_cholesterol")]
    #[validate(range(min = CHOLESTEROL_MIN, max = CHOLESTEROL_MAX))]
    pub cholesterol: f64,
}

fn default_age() -> u32 {
    DEFAULT_AGE
}

fn default_systolic_bp() -> f64 {
    DEFAULT_SYSTOLIC_BP
}

fn default_diastolic_bp() -> f64 {
    DEFAULT_DIASTOLIC_BP
}

fn default_cholesterol() -> f64 {
    DEFAULT_CHOLESTEROL
}

impl Default for VitalsForm {
    fn default() -> Self {
        Self {
            age: DEFAULT_AGE,
            systolic_bp: DEFAULT_SYSTOLIC_BP,
            diastolic_bp: DEFAULT_DIASTOLIC_BP,
            cholesterol: DEFAULT_CHOLESTEROL,
        }
    }
}

impl VitalsForm {
    /// Range-check the submission and hand back the scorer input
    pub fn into_vitals(self) -> AppResult<RawVitals> {
        // Range checks pass NaN through
        let readings = [
            ("systolic_bp", self.systolic_bp),
            ("diastolic_bp", self.diastolic_bp),
            ("cholesterol", self.cholesterol),
        ];
        if let Some((name, _)) = readings.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AppError::ValidationError(format!("{} must be a number", name)));
        }

        self.validate().map_err(range_error)?;

        Ok(RawVitals::new(
            self.age,
            self.systolic_bp,
            self.diastolic_bp,
            self.cholesterol,
        ))
    }

    /// Query string that reproduces this submission
    pub fn to_query(&self) -> String {
        format!(
            "age={}&systolic_bp={}&diastolic_bp={}&cholesterol={}",
            self.age, self.systolic_bp, self.diastolic_bp, self.cholesterol
        )
    }
}

/// One sentence per field out of range, bounds taken from the constants
fn range_error(errors: ValidationErrors) -> AppError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| range_message(&field.to_string()))
        .collect();
    messages.sort();
    AppError::ValidationError(messages.join("; "))
}

fn range_message(field: &str) -> String {
    match field {
        "age" => format!("Age must be between {} and {}", AGE_MIN, AGE_MAX),
        "systolic_bp" => format!(
            "Systolic blood pressure must be between {} and {}",
            SYSTOLIC_BP_MIN, SYSTOLIC_BP_MAX
        ),
        "diastolic_bp" => format!(
            "Diastolic blood pressure must be between {} and {}",
            DIASTOLIC_BP_MIN, DIASTOLIC_BP_MAX
        ),
        "cholesterol" => format!(
            "Cholesterol level must be between {} and {}",
            CHOLESTEROL_MIN, CHOLESTEROL_MAX
        ),
        other => format!("{} is out of range", other),
    }
}

impl From<RawVitals> for VitalsForm {
    fn from(raw: RawVitals) -> Self {
        Self {
            age: raw.age,
            systolic_bp: raw.systolic_bp,
            diastolic_bp: raw.diastolic_bp,
            cholesterol: raw.cholesterol,
        }
    }
}
